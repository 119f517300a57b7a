//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod crud;
pub mod teacher;
pub mod event;
pub mod news;
pub mod gallery;
pub mod download;
pub mod admission;
pub mod user;
pub mod admin;

// Re-export repositories
pub use crud::{CrudRepository, Entity};
pub use user::{UserRepository, NewUser, UserChanges};
pub use admin::AdminRepository;
