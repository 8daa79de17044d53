mod common;

use poem::http::StatusCode;
use serde_json::json;

use common::{assert_error, spawn_app};

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    app.create_user(&admin, "grace", "grace-password", &["User"]).await;

    let resp = app
        .post(
            "/api/users",
            &admin,
            json!({ "username": "GRACE", "password": "other-password", "roles": ["User"] }),
        )
        .await;
    assert_error(resp, StatusCode::CONFLICT, "duplicate_username").await;
}

#[tokio::test]
async fn test_create_user_requires_existing_roles() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let resp = app
        .post("/api/users", &admin, json!({ "username": "heidi", "password": "pw", "roles": [] }))
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "empty_role_list").await;

    let resp = app
        .post(
            "/api/users",
            &admin,
            json!({ "username": "heidi", "password": "pw", "roles": ["Superuser"] }),
        )
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "unknown_role").await;

    // Nothing was written by the failed attempts
    let resp = app
        .post("/api/users", &admin, json!({ "username": "heidi", "password": "pw", "roles": ["user"] }))
        .await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_non_admin_cannot_create_users() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    app.create_user(&admin, "ivan", "ivan-password", &["User"]).await;
    let ivan = app.login("ivan", "ivan-password").await;

    let resp = app
        .post("/api/users", &ivan, json!({ "username": "judy", "password": "pw", "roles": ["Admin"] }))
        .await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;
}

#[tokio::test]
async fn test_user_reads_are_self_or_admin() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let kim_id = app.create_user(&admin, "kim", "kim-password", &["User"]).await;
    let lee_id = app.create_user(&admin, "lee", "lee-password", &["User"]).await;
    let kim = app.login("kim", "kim-password").await;

    let resp = app.get(&format!("/api/users/{}", kim_id), Some(&kim)).await;
    resp.assert_status_is_ok();

    let resp = app.get(&format!("/api/users/{}", lee_id), Some(&kim)).await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;

    let resp = app.get(&format!("/api/users/{}", lee_id), Some(&admin)).await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_self_service_rename_and_password_change() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    app.create_user(&admin, "mallory", "old-password", &["User"]).await;
    app.create_user(&admin, "niaj", "niaj-password", &["User"]).await;
    let token = app.login("mallory", "old-password").await;

    let resp = app.put("/api/users/me", &token, json!({ "username": "Niaj" })).await;
    assert_error(resp, StatusCode::CONFLICT, "duplicate_username").await;

    let resp = app
        .put("/api/users/me", &token, json!({ "username": "mallory2", "password": "new-password" }))
        .await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("username").assert_string("mallory2");

    app.login("mallory2", "new-password").await;
    let resp = app
        .client
        .post("/api/sessions")
        .body_json(&json!({ "username": "mallory2", "password": "old-password" }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_lifecycle() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let resp = app.post("/api/roles", &admin, json!({ "name": "Auditor" })).await;
    resp.assert_status_is_ok();
    let role_id = resp.json().await.value().object().get("id").i64();

    let resp = app.post("/api/roles", &admin, json!({ "name": "auditor" })).await;
    assert_error(resp, StatusCode::CONFLICT, "duplicate_role_name").await;

    let olivia_id = app.create_user(&admin, "olivia", "olivia-password", &["Auditor"]).await;

    let resp = app.get(&format!("/api/roles/{}/members", role_id), Some(&admin)).await;
    resp.assert_status_is_ok();
    let members = resp.json().await;
    members.value().array().assert_len(1);
    members.value().array().get(0).object().get("id").assert_i64(olivia_id);

    let resp = app.delete(&format!("/api/roles/{}", role_id), &admin).await;
    assert_error(resp, StatusCode::CONFLICT, "role_in_use").await;

    // Revoking twice is fine
    for _ in 0..2 {
        let resp = app
            .delete(&format!("/api/users/{}/roles/{}", olivia_id, role_id), &admin)
            .await;
        resp.assert_status_is_ok();
    }

    let resp = app
        .put(&format!("/api/roles/{}", role_id), &admin, json!({ "name": "Reviewer" }))
        .await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("name").assert_string("Reviewer");

    let resp = app.delete(&format!("/api/roles/{}", role_id), &admin).await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = app.get(&format!("/api/roles/{}", role_id), Some(&admin)).await;
    assert_error(resp, StatusCode::NOT_FOUND, "role_not_found").await;
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = spawn_app().await;

    let resp = app.get("/api/health", None).await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("status").assert_string("healthy");
}
