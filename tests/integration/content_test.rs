//! Content collections through the admin API and the public site

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use super::{create_staff, setup};
use crate::helpers::*;
use BrightStart::models::Role;

#[tokio::test]
#[serial]
async fn test_teacher_crud_roundtrip() {
    let Some((db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;
    let (_, admin) = create_staff(&ctx, "admin@brightstart.test", "admin-password", Role::Admin).await;

    let created = ctx.post("/api/admin/teachers", teacher_payload("Jane Doe"), Some(&editor)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["slug"], json!("jane-doe"));
    assert_eq!(created.body["is_active"], json!(true));
    let id = created.body["id"].as_str().unwrap().to_string();

    let fetched = ctx.get(&format!("/api/admin/teachers/{}", id), Some(&editor)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["full_name"], json!("Jane Doe"));

    let updated = ctx
        .patch(&format!("/api/admin/teachers/{}", id), json!({ "position": "Head Teacher" }), Some(&editor))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["position"], json!("Head Teacher"));
    assert_eq!(updated.body["full_name"], json!("Jane Doe"));

    let forbidden = ctx.delete(&format!("/api/admin/teachers/{}", id), Some(&editor)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let deleted = ctx.delete(&format!("/api/admin/teachers/{}", id), Some(&admin)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(db.count_records("teachers").await.unwrap(), 0);

    let missing = ctx.get(&format!("/api/admin/teachers/{}", id), Some(&editor)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let missing = ctx.delete(&format!("/api/admin/teachers/{}", id), Some(&admin)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_slug_collisions_get_suffix() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let first = ctx.post("/api/admin/events", event_payload("Spring Fair!", 10), Some(&editor)).await;
    let second = ctx.post("/api/admin/events", event_payload("Spring  fair", 11), Some(&editor)).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(first.body["slug"], json!("spring-fair"));
    assert_eq!(second.body["slug"], json!("spring-fair-2"));

    // Keeping its own slug on update is not a collision
    let id = first.body["id"].as_str().unwrap();
    let renamed = ctx
        .patch(&format!("/api/admin/events/{}", id), json!({ "slug": "spring-fair" }), Some(&editor))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["slug"], json!("spring-fair"));
}

#[tokio::test]
#[serial]
async fn test_explicit_slug_collisions_get_suffix() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    ctx.post("/api/admin/events", event_payload("Spring Fair", 10), Some(&editor)).await;
    let autumn = ctx.post("/api/admin/events", event_payload("Autumn Fair", 12), Some(&editor)).await;
    let id = autumn.body["id"].as_str().unwrap();

    let renamed = ctx
        .patch(&format!("/api/admin/events/{}", id), json!({ "slug": "spring-fair" }), Some(&editor))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["slug"], json!("spring-fair-2"));

    let mut payload = event_payload("Winter Fair", 14);
    payload["slug"] = json!("spring-fair");
    let created = ctx.post("/api/admin/events", payload, Some(&editor)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["slug"], json!("spring-fair-3"));

    let mut teacher = teacher_payload("Anna Smith");
    teacher["slug"] = json!("anna");
    let first = ctx.post("/api/admin/teachers", teacher.clone(), Some(&editor)).await;
    let second = ctx.post("/api/admin/teachers", teacher, Some(&editor)).await;
    assert_eq!(first.body["slug"], json!("anna"));
    assert_eq!(second.body["slug"], json!("anna-2"));
}

#[tokio::test]
#[serial]
async fn test_counts_respect_visibility() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    ctx.post("/api/admin/teachers", teacher_payload("Present Teacher"), Some(&editor)).await;
    let mut away = teacher_payload("Away Teacher");
    away["is_active"] = json!(false);
    ctx.post("/api/admin/teachers", away, Some(&editor)).await;
    ctx.post("/api/admin/news", news_payload("Published Post", true), Some(&editor)).await;
    ctx.post("/api/admin/news", news_payload("Draft Post", false), Some(&editor)).await;
    ctx.post("/api/admin/news", news_payload("Another Draft", false), Some(&editor)).await;

    let db = &ctx.state.db;
    assert_eq!(db.teachers.count(false).await.unwrap(), 2);
    assert_eq!(db.teachers.count(true).await.unwrap(), 1);
    assert_eq!(db.news.count(false).await.unwrap(), 3);
    assert_eq!(db.news.count(true).await.unwrap(), 1);
    assert_eq!(db.gallery.count(false).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_public_site_only_shows_published_content() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let published = ctx.post("/api/admin/news", news_payload("Sports Day Results", true), Some(&editor)).await;
    let draft = ctx.post("/api/admin/news", news_payload("Draft Newsletter", false), Some(&editor)).await;
    assert_eq!(published.status, StatusCode::CREATED);
    assert_eq!(draft.status, StatusCode::CREATED);
    assert!(published.body["published_at"].is_string());
    assert!(draft.body["published_at"].is_null());

    let public = ctx.get("/api/news", None).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["total"], json!(1));
    assert_eq!(public.body["items"][0]["title"], json!("Sports Day Results"));

    let detail = ctx.get("/api/news/sports-day-results", None).await;
    assert_eq!(detail.status, StatusCode::OK);
    let hidden = ctx.get("/api/news/draft-newsletter", None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let admin_view = ctx.get("/api/admin/news", Some(&editor)).await;
    assert_eq!(admin_view.body["total"], json!(2));
    // Drafts have no published_at and sort after published posts
    assert_eq!(admin_view.body["items"][0]["title"], json!("Sports Day Results"));
    assert_eq!(admin_view.body["items"][1]["title"], json!("Draft Newsletter"));
    let drafts = ctx.get("/api/admin/news?published=false", Some(&editor)).await;
    assert_eq!(drafts.body["total"], json!(1));
    assert_eq!(drafts.body["items"][0]["title"], json!("Draft Newsletter"));

    // Publishing later stamps published_at
    let id = draft.body["id"].as_str().unwrap();
    let now_published = ctx
        .patch(&format!("/api/admin/news/{}", id), json!({ "is_published": true }), Some(&editor))
        .await;
    assert!(now_published.body["published_at"].is_string());
    assert_eq!(ctx.get("/api/news", None).await.body["total"], json!(2));
}

#[tokio::test]
#[serial]
async fn test_event_filters_sorting_and_pagination() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    for (title, days) in [("Past Picnic", -5), ("Music Morning", 3), ("Art Week", 7), ("Book Fair", 14)] {
        let mut payload = event_payload(title, days);
        payload["is_published"] = json!(true);
        if title == "Music Morning" {
            payload["category"] = json!("music");
        }
        let response = ctx.post("/api/admin/events", payload, Some(&editor)).await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let upcoming = ctx.get("/api/events?upcoming=true", None).await;
    assert_eq!(upcoming.body["total"], json!(3));
    assert_eq!(upcoming.body["items"][0]["title"], json!("Music Morning"));

    let music = ctx.get("/api/events?category=music", None).await;
    assert_eq!(music.body["total"], json!(1));

    let by_title = ctx.get("/api/events?sort=title&order=desc", None).await;
    assert_eq!(by_title.body["items"][0]["title"], json!("Past Picnic"));

    let page_two = ctx.get("/api/events?per_page=3&page=2", None).await;
    assert_eq!(page_two.body["total"], json!(4));
    assert_eq!(page_two.body["total_pages"], json!(2));
    assert_eq!(page_two.body["page"], json!(2));
    assert_eq!(page_two.body["items"].as_array().unwrap().len(), 1);

    let beyond = ctx.get("/api/events?per_page=3&page=9", None).await;
    assert_eq!(beyond.status, StatusCode::OK);
    assert_eq!(beyond.body["items"], json!([]));

    let clamped = ctx.get("/api/events?per_page=1000", None).await;
    assert_eq!(clamped.body["per_page"], json!(100));
}

#[tokio::test]
#[serial]
async fn test_event_date_range_checked_against_stored_row() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let created = ctx.post("/api/admin/events", event_payload("Graduation", 20), Some(&editor)).await;
    let id = created.body["id"].as_str().unwrap();

    let too_late = chrono::Utc::now() + chrono::Duration::days(40);
    let response = ctx
        .patch(&format!("/api/admin/events/{}", id), json!({ "starts_at": too_late }), Some(&editor))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_search() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    ctx.post("/api/admin/teachers", teacher_payload("Maria Garcia"), Some(&editor)).await;
    ctx.post("/api/admin/teachers", teacher_payload("Tom Baker"), Some(&editor)).await;

    let found = ctx.get("/api/admin/teachers/search?q=garc", Some(&editor)).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body.as_array().unwrap().len(), 1);
    assert_eq!(found.body[0]["full_name"], json!("Maria Garcia"));

    // Wildcards match literally
    let none = ctx.get("/api/admin/teachers/search?q=%25", Some(&editor)).await;
    assert_eq!(none.body, json!([]));

    let public = ctx.get("/api/teachers?q=baker", None).await;
    assert_eq!(public.body["total"], json!(1));
}

#[tokio::test]
#[serial]
async fn test_download_counter_and_redirect() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let created = ctx
        .post("/api/admin/downloads", json!({
            "title": "Enrollment Form",
            "file_url": "/uploads/2026/01/enrollment.pdf",
            "category": "forms"
        }), Some(&editor))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["file_name"], json!("enrollment.pdf"));
    let id = created.body["id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let response = ctx.get(&format!("/api/downloads/{}/file", id), None).await;
        assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), Some("/uploads/2026/01/enrollment.pdf"));
    }

    let stored = ctx.get(&format!("/api/admin/downloads/{}", id), Some(&editor)).await;
    assert_eq!(stored.body["download_count"], json!(2));

    ctx.patch(&format!("/api/admin/downloads/{}", id), json!({ "is_published": false }), Some(&editor)).await;
    let hidden = ctx.get(&format!("/api/downloads/{}/file", id), None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_gallery_listing() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    for (title, category) in [("Painting", "art"), ("Football", "sports"), ("Clay", "art")] {
        let response = ctx
            .post("/api/admin/gallery", json!({
                "title": title,
                "image_url": format!("/uploads/2026/01/{}.jpg", title.to_lowercase()),
                "category": category
            }), Some(&editor))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let art = ctx.get("/api/gallery?category=art&sort=title", None).await;
    assert_eq!(art.body["total"], json!(2));
    assert_eq!(art.body["items"][0]["title"], json!("Clay"));

    let bad_link = ctx
        .post("/api/admin/gallery", json!({ "title": "Bad", "image_url": "javascript:alert(1)" }), Some(&editor))
        .await;
    assert_eq!(bad_link.status, StatusCode::BAD_REQUEST);
}
