//! Test data helpers for creating request payloads and staff users

use chrono::{Duration, NaiveDate, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};
use uuid::Uuid;

use BrightStart::models::{Role, User};

/// A staff user that only exists in memory, for signing tokens
pub fn staff_user(role: Role) -> User {
    User {
        id: Uuid::new_v4(),
        email: SafeEmail().fake::<String>().to_lowercase(),
        password_hash: String::new(),
        full_name: Name().fake(),
        role: role.as_str().to_string(),
        is_active: true,
        last_login_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn teacher_payload(full_name: &str) -> Value {
    json!({
        "full_name": full_name,
        "position": "Lead Teacher",
        "bio": "Loves finger painting and story time.",
        "display_order": 1
    })
}

pub fn event_payload(title: &str, days_from_now: i64) -> Value {
    let starts_at = Utc::now() + Duration::days(days_from_now);
    json!({
        "title": title,
        "description": "Parents and children welcome",
        "location": "Main hall",
        "category": "celebration",
        "starts_at": starts_at,
        "ends_at": starts_at + Duration::hours(2)
    })
}

pub fn news_payload(title: &str, published: bool) -> Value {
    json!({
        "title": title,
        "excerpt": "A short summary",
        "body": "Everything that happened this week.",
        "is_published": published
    })
}

/// Date of birth for a child of roughly the given age
pub fn birth_date_for_age(years: i64) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(years * 365 + 30)
}

pub fn admission_payload() -> Value {
    json!({
        "child_first_name": "Mia",
        "child_last_name": "Stone",
        "child_date_of_birth": birth_date_for_age(4),
        "program": "pre_k",
        "parent_name": Name().fake::<String>(),
        "parent_email": SafeEmail().fake::<String>(),
        "parent_phone": "+1 555 010 2030",
        "notes": "Allergic to peanuts"
    })
}
