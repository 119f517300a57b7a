//! Generic CRUD repository
//!
//! Every content table (teachers, events, news, gallery, downloads,
//! admissions) shares the same read/list/search/delete SQL. Each entity
//! describes its table through [`Entity`] and supplies its own insert and
//! update statements. Column names only ever come from those constants;
//! user input is always bound.

use std::marker::PhantomData;
use std::time::Instant;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::listing::{ListQuery, Page, SortOrder};
use crate::models::{Role, Validate};
use crate::utils::errors::{BrightStartError, Result};
use crate::utils::helpers::slugify;
use crate::utils::logging::log_database_operation;

/// Table metadata and write statements for a CRUD entity
#[async_trait]
pub trait Entity: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    type Create: DeserializeOwned + Validate + Send + 'static;
    type Update: DeserializeOwned + Validate + Send + 'static;

    /// Singular name used in errors and logs
    const NAME: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;
    const SLUG_COLUMN: Option<&'static str> = None;
    const SEARCH_COLUMNS: &'static [&'static str];
    const FILTER_COLUMNS: &'static [&'static str] = &[];
    const SORT_COLUMNS: &'static [&'static str];
    const DEFAULT_SORT: (&'static str, SortOrder);
    /// Sort columns that may hold NULL; those rows always sort last
    const NULLABLE_SORT_COLUMNS: &'static [&'static str] = &[];
    /// Boolean column that hides a row from the public site when false
    const VISIBILITY_COLUMN: Option<&'static str> = None;
    /// Timestamp column used by `upcoming=true`
    const DATE_COLUMN: Option<&'static str> = None;
    const WRITE_ROLE: Role = Role::Editor;
    const DELETE_ROLE: Role = Role::Admin;

    async fn insert(pool: &PgPool, input: Self::Create, actor: Option<Uuid>) -> Result<Self>;

    async fn update(pool: &PgPool, id: Uuid, input: Self::Update, actor: Option<Uuid>) -> Result<Self>;
}

/// Generic repository over an [`Entity`]
pub struct CrudRepository<T> {
    pool: PgPool,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for CrudRepository<T> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

/// Escape LIKE wildcards so user text matches literally
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Tracks whether the next condition needs `WHERE` or `AND`
struct Conditions {
    started: bool,
}

impl Conditions {
    fn new() -> Self {
        Self { started: false }
    }

    fn next(&mut self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
    }
}

/// Reject query parameters the entity cannot honour
pub fn check_query<T: Entity>(query: &ListQuery) -> Result<()> {
    for (column, _) in query.equality_filters() {
        if !T::FILTER_COLUMNS.contains(&column) {
            return Err(BrightStartError::Validation(format!(
                "{} cannot be filtered by {}",
                T::TABLE, column
            )));
        }
    }

    if let Some(sort) = query.sort.as_deref() {
        if !T::SORT_COLUMNS.contains(&sort) {
            return Err(BrightStartError::Validation(format!(
                "{} cannot be sorted by {}; allowed: {}",
                T::TABLE,
                sort,
                T::SORT_COLUMNS.join(", ")
            )));
        }
    }

    if query.published.is_some() && T::VISIBILITY_COLUMN.is_none() {
        return Err(BrightStartError::Validation(format!(
            "{} has no published flag",
            T::TABLE
        )));
    }

    if query.upcoming.is_some() && T::DATE_COLUMN.is_none() {
        return Err(BrightStartError::Validation(format!(
            "{} has no date to filter upcoming rows",
            T::TABLE
        )));
    }

    Ok(())
}

fn push_conditions<T: Entity>(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery, visible_only: bool) {
    let mut conditions = Conditions::new();

    if let Some(column) = T::VISIBILITY_COLUMN {
        let wanted = if visible_only { Some(true) } else { query.published };
        if let Some(wanted) = wanted {
            conditions.next(qb);
            qb.push(column).push(" = ").push_bind(wanted);
        }
    }

    if let (Some(column), Some(true)) = (T::DATE_COLUMN, query.upcoming) {
        conditions.next(qb);
        qb.push(column).push(" >= NOW()");
    }

    for (column, value) in query.equality_filters() {
        conditions.next(qb);
        qb.push(column).push(" = ").push_bind(value.to_string());
    }

    if let Some(term) = query.search_term() {
        if !T::SEARCH_COLUMNS.is_empty() {
            let pattern = like_pattern(term);
            conditions.next(qb);
            qb.push("(");
            for (i, column) in T::SEARCH_COLUMNS.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
            }
            qb.push(")");
        }
    }
}

fn push_order<T: Entity>(qb: &mut QueryBuilder<'_, Postgres>, query: &ListQuery) {
    let (default_column, default_order) = T::DEFAULT_SORT;
    let column = query.sort.as_deref().unwrap_or(default_column);
    let order = query.order.unwrap_or(if column == default_column {
        default_order
    } else {
        SortOrder::Asc
    });

    qb.push(" ORDER BY ")
        .push(column)
        .push(" ")
        .push(order.as_sql());
    if T::NULLABLE_SORT_COLUMNS.contains(&column) {
        qb.push(" NULLS LAST");
    }
    qb.push(", id ASC");
}

impl<T: Entity> CrudRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Validate and insert a new row
    pub async fn create(&self, input: T::Create, actor: Option<Uuid>) -> Result<T> {
        input.validate()?;
        T::insert(&self.pool, input, actor).await
    }

    /// Find a row by id; `visible_only` hides unpublished rows
    pub async fn get_by_id(&self, id: Uuid, visible_only: bool) -> Result<Option<T>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE id = ",
            T::COLUMNS,
            T::TABLE
        ));
        qb.push_bind(id);
        if let (true, Some(column)) = (visible_only, T::VISIBILITY_COLUMN) {
            qb.push(" AND ").push(column).push(" = TRUE");
        }

        Ok(qb.build_query_as::<T>().fetch_optional(&self.pool).await?)
    }

    /// Find a row by slug, for entities that have one
    pub async fn get_by_slug(&self, slug: &str, visible_only: bool) -> Result<Option<T>> {
        let Some(slug_column) = T::SLUG_COLUMN else {
            return Ok(None);
        };

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE {} = ",
            T::COLUMNS,
            T::TABLE,
            slug_column
        ));
        qb.push_bind(slug.to_string());
        if let (true, Some(column)) = (visible_only, T::VISIBILITY_COLUMN) {
            qb.push(" AND ").push(column).push(" = TRUE");
        }

        Ok(qb.build_query_as::<T>().fetch_optional(&self.pool).await?)
    }

    /// Get by id or fail with not-found
    pub async fn require(&self, id: Uuid) -> Result<T> {
        self.get_by_id(id, false)
            .await?
            .ok_or_else(|| BrightStartError::not_found(T::NAME, id))
    }

    /// Filtered, sorted, paginated listing
    pub async fn get_all(&self, query: &ListQuery, visible_only: bool) -> Result<Page<T>> {
        check_query::<T>(query)?;
        let started = Instant::now();

        let mut count_qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
        push_conditions::<T>(&mut count_qb, query, visible_only);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE));
        push_conditions::<T>(&mut qb, query, visible_only);
        push_order::<T>(&mut qb, query);
        qb.push(" LIMIT ")
            .push_bind(i64::from(query.per_page()))
            .push(" OFFSET ")
            .push_bind(query.offset());

        let items = qb.build_query_as::<T>().fetch_all(&self.pool).await?;
        log_database_operation("list", T::TABLE, started.elapsed().as_millis() as u64, true);

        Ok(Page::new(items, total, query))
    }

    /// Case-insensitive substring search over the entity's text columns
    pub async fn search(&self, term: &str, limit: u32, visible_only: bool) -> Result<Vec<T>> {
        let query = ListQuery {
            q: Some(term.to_string()),
            per_page: Some(limit),
            ..Default::default()
        };
        if query.search_term().is_none() {
            return Ok(Vec::new());
        }
        Ok(self.get_all(&query, visible_only).await?.items)
    }

    /// Validate and apply a partial update
    pub async fn update(&self, id: Uuid, input: T::Update, actor: Option<Uuid>) -> Result<T> {
        input.validate()?;
        match T::update(&self.pool, id, input, actor).await {
            Err(BrightStartError::Database(sqlx::Error::RowNotFound)) => {
                Err(BrightStartError::not_found(T::NAME, id))
            }
            other => other,
        }
    }

    /// Delete a row; returns whether anything was removed
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", T::TABLE))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count rows, optionally only visible ones
    pub async fn count(&self, visible_only: bool) -> Result<i64> {
        self.count_matching(&ListQuery::default(), visible_only).await
    }

    /// Count rows passing the same filters a listing would apply
    pub async fn count_matching(&self, query: &ListQuery, visible_only: bool) -> Result<i64> {
        check_query::<T>(query)?;
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
        push_conditions::<T>(&mut qb, query, visible_only);
        Ok(qb.build_query_scalar().fetch_one(&self.pool).await?)
    }
}

/// First free slug derived from `source`, trying `-2`, `-3`, ... on collision.
///
/// `exclude` skips the row being updated so it can keep its own slug.
pub async fn unique_slug<T: Entity>(pool: &PgPool, source: &str, exclude: Option<Uuid>) -> Result<String> {
    let Some(column) = T::SLUG_COLUMN else {
        return Err(BrightStartError::Config(format!("{} has no slug column", T::TABLE)));
    };

    let mut base = slugify(source);
    if base.is_empty() {
        base = T::NAME.to_string();
    }

    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1 AND ($2::uuid IS NULL OR id <> $2))",
        T::TABLE,
        column
    );

    for n in 1..=50 {
        let candidate = if n == 1 { base.clone() } else { format!("{}-{}", base, n) };
        let taken: bool = sqlx::query_scalar(&sql)
            .bind(candidate.as_str())
            .bind(exclude)
            .fetch_one(pool)
            .await?;
        if !taken {
            return Ok(candidate);
        }
    }

    Err(BrightStartError::Conflict(format!(
        "could not find a free slug for '{}'",
        base
    )))
}

/// Make a caller-chosen slug unique; `None` leaves the stored slug alone
pub async fn resolve_slug<T: Entity>(pool: &PgPool, slug: Option<&str>, exclude: Option<Uuid>) -> Result<Option<String>> {
    match slug {
        Some(slug) => Ok(Some(unique_slug::<T>(pool, slug, exclude).await?)),
        None => Ok(None),
    }
}
