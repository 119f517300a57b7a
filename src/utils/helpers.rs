//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::distributions::{Alphanumeric, DistString};
use regex::Regex;

use crate::utils::errors::{BrightStartError, Result};

/// Turn a title into a URL slug.
///
/// Non-alphanumeric runs collapse into a single dash and accents are not
/// transliterated, so "Café Day" becomes "caf-day".
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.len() > 80 {
        slug.truncate(80);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

/// Check a slug is lowercase ascii words joined by single dashes
pub fn is_valid_slug(slug: &str) -> bool {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    let re = SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("static slug regex"));
    slug.len() <= 80 && re.is_match(slug)
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
            .expect("static email regex")
    });
    email.len() <= 254 && re.is_match(email)
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
        && (7..=20).contains(&digits)
}

/// Accept absolute http(s) URLs and site-relative paths
pub fn is_valid_link(link: &str) -> bool {
    if link.starts_with('/') {
        return !link.starts_with("//") && !link.contains("..");
    }

    match url::Url::parse(link) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

/// Calculate pagination offset
pub fn calculate_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(page_size)
}

/// Number of pages needed for `total` items
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    if total <= 0 || page_size == 0 {
        return 0;
    }
    let size = i64::from(page_size);
    ((total + size - 1) / size) as u32
}

/// Sanitize filename for safe storage
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.').to_string();
    if trimmed.is_empty() {
        "file".to_string()
    } else if trimmed.len() > 100 {
        trimmed[trimmed.len() - 100..].to_string()
    } else {
        trimmed
    }
}

/// Lowercased extension of a filename, if any
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whole years between a birth date and `on`
pub fn age_in_years(birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// Admission reference such as `ADM-2026-K7Q2ZD`
pub fn generate_reference(prefix: &str, now: DateTime<Utc>) -> String {
    let suffix = Alphanumeric
        .sample_string(&mut rand::thread_rng(), 6)
        .to_ascii_uppercase();
    format!("{}-{}-{}", prefix, now.year(), suffix)
}

/// Trimmed, non-empty, bounded text
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BrightStartError::Validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(BrightStartError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Bounded optional text
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(BrightStartError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        ))),
        _ => Ok(()),
    }
}

/// Optional link that must be well formed when present
pub fn optional_link(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !is_valid_link(v) => Err(BrightStartError::Validation(format!(
            "{} must be an http(s) URL or a site path",
            field
        ))),
        _ => Ok(()),
    }
}

/// Optional slug that must be well formed when present
pub fn optional_slug(value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if !is_valid_slug(v) => Err(BrightStartError::Validation(
            "slug may only contain lowercase letters, digits and single dashes".to_string(),
        )),
        _ => Ok(()),
    }
}
