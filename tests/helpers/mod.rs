//! Test helpers module
//!
//! This module provides utilities and helpers for testing the BrightStart application.
//! It includes database helpers, generated test data and a router test context.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_context;
pub mod test_data;

pub use database_helper::*;
pub use test_context::*;
pub use test_data::*;
