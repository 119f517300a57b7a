//! Site settings, the home page payload and dashboard figures

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use super::{create_staff, setup};
use crate::helpers::*;
use BrightStart::models::Role;

#[tokio::test]
#[serial]
async fn test_settings_visibility() {
    let Some((_db, ctx)) = setup().await else { return };
    let (admin_user, admin) = create_staff(&ctx, "admin@brightstart.test", "admin-password", Role::Admin).await;

    let saved = ctx
        .put("/api/admin/settings/contact.phone", json!({ "value": "+1 555 0100", "is_public": true }), Some(&admin))
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.body["updated_by"], json!(admin_user.id.to_string()));

    ctx.put("/api/admin/settings/mail.smtp_host", json!({ "value": "smtp.internal" }), Some(&admin)).await;
    ctx.put("/api/admin/settings/hours", json!({ "value": { "open": "7:30", "close": "18:00" }, "is_public": true }), Some(&admin)).await;

    let public = ctx.get("/api/settings/public", None).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body, json!({
        "contact.phone": "+1 555 0100",
        "hours": { "open": "7:30", "close": "18:00" }
    }));

    // Upsert replaces the value in place
    ctx.put("/api/admin/settings/contact.phone", json!({ "value": "+1 555 0199", "is_public": true }), Some(&admin)).await;
    let all = ctx.get("/api/admin/settings", Some(&admin)).await;
    assert_eq!(all.body.as_array().unwrap().len(), 3);

    let removed = ctx.delete("/api/admin/settings/hours", Some(&admin)).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);
    let missing = ctx.delete("/api/admin/settings/hours", Some(&admin)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let public = ctx.get("/api/settings/public", None).await;
    assert_eq!(public.body, json!({ "contact.phone": "+1 555 0199" }));
}

#[tokio::test]
#[serial]
async fn test_home_page() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, admin) = create_staff(&ctx, "admin@brightstart.test", "admin-password", Role::Admin).await;

    for days in [1, 2, 3, 4] {
        let mut payload = event_payload(&format!("Event {}", days), days);
        payload["is_published"] = json!(true);
        ctx.post("/api/admin/events", payload, Some(&admin)).await;
    }
    ctx.post("/api/admin/news", news_payload("Welcome Back", true), Some(&admin)).await;
    ctx.post("/api/admin/news", news_payload("Unfinished", false), Some(&admin)).await;

    let mut hidden_teacher = teacher_payload("On Leave");
    hidden_teacher["is_active"] = json!(false);
    ctx.post("/api/admin/teachers", hidden_teacher, Some(&admin)).await;
    ctx.post("/api/admin/teachers", teacher_payload("Present Teacher"), Some(&admin)).await;
    ctx.put("/api/admin/settings/hero.title", json!({ "value": "Learning through play", "is_public": true }), Some(&admin)).await;

    let home = ctx.get("/api/pages/home", None).await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.body["site"]["school_name"], json!("BrightStart Kindergarten"));
    assert_eq!(home.body["settings"]["hero.title"], json!("Learning through play"));

    let events = home.body["upcoming_events"].as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["title"], json!("Event 1"));

    assert_eq!(home.body["latest_news"].as_array().unwrap().len(), 1);
    let teachers = home.body["teachers"].as_array().unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0]["full_name"], json!("Present Teacher"));
    assert_eq!(home.body["gallery"], json!([]));
}

#[tokio::test]
#[serial]
async fn test_dashboard_stats() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let (_, admin) = create_staff(&ctx, "admin@brightstart.test", "admin-password", Role::Admin).await;

    ctx.post("/api/admin/teachers", teacher_payload("Jane Doe"), Some(&editor)).await;
    let mut away = teacher_payload("Away Teacher");
    away["is_active"] = json!(false);
    ctx.post("/api/admin/teachers", away, Some(&editor)).await;
    ctx.post("/api/admin/events", event_payload("Draft Event", 5), Some(&editor)).await;
    let mut open_day = event_payload("Open Day", 6);
    open_day["is_published"] = json!(true);
    ctx.post("/api/admin/events", open_day, Some(&editor)).await;
    let mut past = event_payload("Past Picnic", -3);
    past["is_published"] = json!(true);
    ctx.post("/api/admin/events", past, Some(&editor)).await;

    let first = ctx.post("/api/admissions", admission_payload(), None).await;
    ctx.post("/api/admissions", admission_payload(), None).await;
    let third = ctx.post("/api/admissions", admission_payload(), None).await;
    let first_id = first.body["id"].as_str().unwrap();
    let third_id = third.body["id"].as_str().unwrap();
    ctx.patch(&format!("/api/admin/admissions/{}", first_id), json!({ "status": "reviewing" }), Some(&admin)).await;
    ctx.patch(&format!("/api/admin/admissions/{}", third_id), json!({ "status": "rejected" }), Some(&admin)).await;

    let stats = ctx.get("/api/admin/dashboard", Some(&editor)).await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.body["teachers"], json!(2));
    assert_eq!(stats.body["active_teachers"], json!(1));
    assert_eq!(stats.body["events"], json!(3));
    assert_eq!(stats.body["upcoming_events"], json!(1));
    assert_eq!(stats.body["admissions"], json!(3));
    assert_eq!(stats.body["pending_admissions"], json!(2));
    assert_eq!(stats.body["total_downloads"], json!(0));
    assert_eq!(stats.body["users"], json!(2));
}

#[tokio::test]
#[serial]
async fn test_health_with_database() {
    let Some((_db, ctx)) = setup().await else { return };

    let health = ctx.get("/api/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], json!("ok"));
    assert_eq!(health.body["database"], json!(true));
}
