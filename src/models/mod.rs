//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod teacher;
pub mod event;
pub mod news;
pub mod gallery;
pub mod download;
pub mod admission;
pub mod admin;
pub mod listing;

// Re-export commonly used models
pub use user::{User, Role, CreateUserRequest, UpdateUserRequest, LoginRequest, LoginResponse, ChangePasswordRequest};
pub use teacher::{Teacher, CreateTeacherRequest, UpdateTeacherRequest};
pub use event::{Event, CreateEventRequest, UpdateEventRequest};
pub use news::{NewsPost, CreateNewsRequest, UpdateNewsRequest};
pub use gallery::{GalleryItem, CreateGalleryItemRequest, UpdateGalleryItemRequest};
pub use download::{Download, CreateDownloadRequest, UpdateDownloadRequest};
pub use admission::{AdmissionApplication, AdmissionStatus, AdmissionReceipt, Program, SubmitAdmissionRequest, ReviewAdmissionRequest};
pub use admin::{SiteSetting, UpsertSettingRequest, DashboardStats};
pub use listing::{ListQuery, Page, SortOrder};

/// Field-level checks run on request payloads before they reach the database
pub trait Validate {
    fn validate(&self) -> crate::utils::errors::Result<()>;
}
