//! Staff accounts: bootstrap, login, password changes and management

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

use super::{create_staff, setup};
use crate::helpers::*;
use BrightStart::models::Role;

#[tokio::test]
#[serial]
async fn test_bootstrap_superadmin_created_once() {
    let Some((db, ctx)) = setup().await else { return };
    let mut auth = ctx.state.settings.auth.clone();
    auth.bootstrap_email = Some("owner@brightstart.test".to_string());
    auth.bootstrap_password = Some("first-run-password".to_string());

    let user_service = &ctx.state.services.user_service;
    let created = user_service.ensure_bootstrap_user(&auth).await.unwrap();
    let created = created.expect("bootstrap user");
    assert_eq!(created.role(), Role::Superadmin);

    let again = user_service.ensure_bootstrap_user(&auth).await.unwrap();
    assert!(again.is_none());
    assert_eq!(db.count_records("users").await.unwrap(), 1);

    let login = ctx
        .post("/api/auth/login", json!({ "email": "Owner@BrightStart.test", "password": "first-run-password" }), None)
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_login_issues_session() {
    let Some((_db, ctx)) = setup().await else { return };
    create_staff(&ctx, "teacher@brightstart.test", "right-password", Role::Editor).await;

    let wrong = ctx
        .post("/api/auth/login", json!({ "email": "teacher@brightstart.test", "password": "wrong-password" }), None)
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let unknown = ctx
        .post("/api/auth/login", json!({ "email": "nobody@brightstart.test", "password": "wrong-password" }), None)
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body["error"]["message"], wrong.body["error"]["message"]);

    let login = ctx
        .post("/api/auth/login", json!({ "email": "teacher@brightstart.test", "password": "right-password" }), None)
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["role"], json!("editor"));
    assert!(login.body["user"]["last_login_at"].is_string());
    assert!(login.body["user"].get("password_hash").is_none());
    let cookie = login.header("set-cookie").expect("session cookie");
    assert!(cookie.starts_with("bs_session="));
    assert!(cookie.contains("HttpOnly"));

    let token = login.body["token"].as_str().unwrap();
    let me = ctx.get("/api/admin/me", Some(token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["email"], json!("teacher@brightstart.test"));
}

#[tokio::test]
#[serial]
async fn test_disabled_account_loses_access() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, owner) = create_staff(&ctx, "owner@brightstart.test", "owner-password", Role::Superadmin).await;
    let (editor_user, editor) = create_staff(&ctx, "editor@brightstart.test", "editor-password", Role::Editor).await;

    let disabled = ctx
        .patch(&format!("/api/admin/users/{}", editor_user.id), json!({ "is_active": false }), Some(&owner))
        .await;
    assert_eq!(disabled.status, StatusCode::OK);
    assert_eq!(disabled.body["is_active"], json!(false));

    let login = ctx
        .post("/api/auth/login", json!({ "email": "editor@brightstart.test", "password": "editor-password" }), None)
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let me = ctx.get("/api/admin/me", Some(&editor)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_change_password() {
    let Some((_db, ctx)) = setup().await else { return };
    let (_, token) = create_staff(&ctx, "admin@brightstart.test", "old-password", Role::Admin).await;

    let wrong = ctx
        .patch("/api/admin/me/password", json!({ "current_password": "not-it-at-all", "new_password": "new-password" }), Some(&token))
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);

    let changed = ctx
        .patch("/api/admin/me/password", json!({ "current_password": "old-password", "new_password": "new-password" }), Some(&token))
        .await;
    assert_eq!(changed.status, StatusCode::NO_CONTENT);

    let old = ctx
        .post("/api/auth/login", json!({ "email": "admin@brightstart.test", "password": "old-password" }), None)
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = ctx
        .post("/api/auth/login", json!({ "email": "admin@brightstart.test", "password": "new-password" }), None)
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_user_management() {
    let Some((db, ctx)) = setup().await else { return };
    let (_, owner) = create_staff(&ctx, "owner@brightstart.test", "owner-password", Role::Superadmin).await;

    let payload = json!({
        "email": "New.Editor@BrightStart.test",
        "password": "editor-password",
        "full_name": "New Editor",
        "role": "editor"
    });
    let created = ctx.post("/api/admin/users", payload.clone(), Some(&owner)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["email"], json!("new.editor@brightstart.test"));
    let id = created.body["id"].as_str().unwrap().to_string();

    let duplicate = ctx.post("/api/admin/users", payload, Some(&owner)).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let promoted = ctx
        .patch(&format!("/api/admin/users/{}", id), json!({ "role": "admin" }), Some(&owner))
        .await;
    assert_eq!(promoted.body["role"], json!("admin"));

    let listed = ctx.get("/api/admin/users", Some(&owner)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let users = listed.body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["role"], json!("superadmin"));

    let deleted = ctx.delete(&format!("/api/admin/users/{}", id), Some(&owner)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(db.count_records("users").await.unwrap(), 1);

    let gone = ctx.delete(&format!("/api/admin/users/{}", id), Some(&owner)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}
