//! List query and page types shared by every collection endpoint

use serde::{Deserialize, Serialize};

use crate::utils::helpers::{calculate_offset, total_pages};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filtering, sorting and pagination parameters from the query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub program: Option<String>,
    pub published: Option<bool>,
    pub upcoming: Option<bool>,
}

impl ListQuery {
    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        calculate_offset(self.page(), self.per_page())
    }

    /// Search term with surrounding whitespace removed, if non-empty
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Equality filters present in the query, keyed by column name
    pub fn equality_filters(&self) -> Vec<(&'static str, &str)> {
        let mut filters = Vec::new();
        if let Some(category) = self.category.as_deref().filter(|v| !v.is_empty()) {
            filters.push(("category", category));
        }
        if let Some(status) = self.status.as_deref().filter(|v| !v.is_empty()) {
            filters.push(("status", status));
        }
        if let Some(program) = self.program.as_deref().filter(|v| !v.is_empty()) {
            filters.push(("program", program));
        }
        filters
    }

    /// Same query restricted to the first `limit` rows
    pub fn first(limit: u32) -> Self {
        Self {
            per_page: Some(limit),
            ..Default::default()
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &ListQuery) -> Self {
        let per_page = query.per_page();
        Self {
            items,
            total,
            page: query.page(),
            per_page,
            total_pages: total_pages(total, per_page),
        }
    }
}
