//! Database service layer
//! 
//! This module provides a high-level interface to database operations

use crate::database::{AdminRepository, CrudRepository, DatabasePool, Entity, UserRepository};
use crate::models::*;
use crate::utils::errors::Result;

/// How many items each section of the home page shows
pub const HOME_EVENTS: u32 = 3;
pub const HOME_NEWS: u32 = 3;
pub const HOME_GALLERY: u32 = 6;

#[derive(Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub teachers: CrudRepository<Teacher>,
    pub events: CrudRepository<Event>,
    pub news: CrudRepository<NewsPost>,
    pub gallery: CrudRepository<GalleryItem>,
    pub downloads: CrudRepository<Download>,
    pub admissions: CrudRepository<AdmissionApplication>,
    pub users: UserRepository,
    pub admin: AdminRepository,
}

/// Everything the public home page needs in one payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct HomePage {
    pub settings: std::collections::BTreeMap<String, serde_json::Value>,
    pub upcoming_events: Vec<Event>,
    pub latest_news: Vec<NewsPost>,
    pub teachers: Vec<Teacher>,
    pub gallery: Vec<GalleryItem>,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            teachers: CrudRepository::new(pool.clone()),
            events: CrudRepository::new(pool.clone()),
            news: CrudRepository::new(pool.clone()),
            gallery: CrudRepository::new(pool.clone()),
            downloads: CrudRepository::new(pool.clone()),
            admissions: CrudRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            admin: AdminRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Repository for any CRUD entity
    pub fn repository<T: Entity>(&self) -> CrudRepository<T> {
        CrudRepository::new(self.pool.clone())
    }

    /// Assemble the public home page
    pub async fn home_page(&self) -> Result<HomePage> {
        let active_teachers = ListQuery {
            per_page: Some(crate::models::listing::MAX_PER_PAGE),
            ..Default::default()
        };

        let (settings, upcoming_events, latest_news, teachers, gallery) = tokio::try_join!(
            self.admin.public_settings(),
            self.events.upcoming(HOME_EVENTS),
            self.news.latest(HOME_NEWS),
            self.teachers.get_all(&active_teachers, true),
            self.gallery.recent(HOME_GALLERY),
        )?;

        Ok(HomePage {
            settings,
            upcoming_events,
            latest_news,
            teachers: teachers.items,
            gallery,
        })
    }

    /// Get dashboard statistics
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let upcoming = ListQuery { upcoming: Some(true), ..Default::default() };
        let with_status = |status: AdmissionStatus| ListQuery {
            status: Some(status.as_str().to_string()),
            ..Default::default()
        };
        let pending_query = with_status(AdmissionStatus::Pending);
        let reviewing_query = with_status(AdmissionStatus::Reviewing);

        let (teachers, active_teachers, events, upcoming_events, news_posts, gallery_items) = tokio::try_join!(
            self.teachers.count(false),
            self.teachers.count(true),
            self.events.count(false),
            self.events.count_matching(&upcoming, true),
            self.news.count(false),
            self.gallery.count(false),
        )?;
        let (downloads, total_downloads, admissions, pending, reviewing, users) = tokio::try_join!(
            self.downloads.count(false),
            self.admin.total_downloads(),
            self.admissions.count(false),
            self.admissions.count_matching(&pending_query, false),
            self.admissions.count_matching(&reviewing_query, false),
            self.users.count(),
        )?;

        Ok(DashboardStats {
            teachers,
            active_teachers,
            events,
            upcoming_events,
            news_posts,
            gallery_items,
            downloads,
            total_downloads,
            admissions,
            pending_admissions: pending + reviewing,
            users,
        })
    }
}
