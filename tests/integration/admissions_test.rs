//! Admission applications from submission through review

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use super::{create_staff, setup};
use crate::helpers::*;
use BrightStart::models::Role;

#[tokio::test]
#[serial]
async fn test_submit_and_review_workflow() {
    let Some((db, ctx)) = setup().await else { return };
    let (admin_user, admin) = create_staff(&ctx, "admin@brightstart.test", "admin-password", Role::Admin).await;

    let receipt = ctx.post("/api/admissions", admission_payload(), None).await;
    assert_eq!(receipt.status, StatusCode::CREATED);
    assert_eq!(receipt.body["status"], json!("pending"));
    let reference = receipt.body["reference"].as_str().unwrap().to_string();
    assert!(reference.starts_with("ADM-"));
    let id = receipt.body["id"].as_str().unwrap().to_string();
    assert_eq!(db.count_records("admission_applications").await.unwrap(), 1);

    let listed = ctx.get("/api/admin/admissions?status=pending", Some(&admin)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["total"], json!(1));
    assert_eq!(listed.body["items"][0]["reference"], json!(reference));

    let by_program = ctx.get("/api/admin/admissions?program=nursery", Some(&admin)).await;
    assert_eq!(by_program.body["total"], json!(0));

    let reviewing = ctx
        .patch(&format!("/api/admin/admissions/{}", id), json!({ "status": "reviewing" }), Some(&admin))
        .await;
    assert_eq!(reviewing.status, StatusCode::OK);
    assert_eq!(reviewing.body["status"], json!("reviewing"));
    assert_eq!(reviewing.body["reviewed_by"], json!(admin_user.id.to_string()));
    assert!(reviewing.body["reviewed_at"].is_string());

    let noted = ctx
        .patch(&format!("/api/admin/admissions/{}", id), json!({ "admin_notes": "Visit booked" }), Some(&admin))
        .await;
    assert_eq!(noted.status, StatusCode::OK);
    assert_eq!(noted.body["status"], json!("reviewing"));
    assert_eq!(noted.body["admin_notes"], json!("Visit booked"));

    let accepted = ctx
        .patch(&format!("/api/admin/admissions/{}", id), json!({ "status": "accepted" }), Some(&admin))
        .await;
    assert_eq!(accepted.body["status"], json!("accepted"));

    let reopened = ctx
        .patch(&format!("/api/admin/admissions/{}", id), json!({ "status": "pending" }), Some(&admin))
        .await;
    assert_eq!(reopened.status, StatusCode::CONFLICT);
    assert_eq!(reopened.error_code(), Some("invalid_state_transition"));
}

#[tokio::test]
#[serial]
async fn test_editor_cannot_review() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let receipt = ctx.post("/api/admissions", admission_payload(), None).await;
    let id = receipt.body["id"].as_str().unwrap();

    let response = ctx
        .patch(&format!("/api/admin/admissions/{}", id), json!({ "status": "rejected" }), Some(&editor))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn test_review_of_missing_application() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, admin) = create_staff(&ctx, "admin@brightstart.test", "admin-password", Role::Admin).await;

    let response = ctx
        .patch(&format!("/api/admin/admissions/{}", uuid::Uuid::new_v4()), json!({ "status": "reviewing" }), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let empty = ctx
        .patch(&format!("/api/admin/admissions/{}", uuid::Uuid::new_v4()), json!({}), Some(&admin))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_references_are_unique() {
    let Some((_db, ctx)) = setup().await else { return };

    let mut references = std::collections::HashSet::new();
    for _ in 0..5 {
        let receipt = ctx.post("/api/admissions", admission_payload(), None).await;
        assert_eq!(receipt.status, StatusCode::CREATED);
        assert!(references.insert(receipt.body["reference"].as_str().unwrap().to_string()));
    }
}
