mod common;

use poem::http::StatusCode;
use serde_json::json;

use common::{assert_error, spawn_app};

#[tokio::test]
async fn test_owner_reassignment_and_descriptive_only_updates() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let alice_id = app.create_user(&admin, "alice", "alice-password", &["Admin"]).await;
    let bob_id = app.create_user(&admin, "bob", "bob-password", &["User"]).await;
    app.create_user(&admin, "carol", "carol-password", &["User"]).await;

    let alice = app.login("alice", "alice-password").await;
    let resp = app
        .post("/api/locations", &alice, json!({ "name": "A", "address": "X", "table_count": 5 }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let created = resp.json().await;
    created.value().object().get("manager_id").assert_null();
    let location_id = created.value().object().get("id").i64();
    let path = format!("/api/locations/{}", location_id);

    // Admin moves the manager to bob
    let resp = app
        .put(&path, &alice, json!({ "name": "A", "address": "X", "table_count": 5, "manager_id": bob_id }))
        .await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("manager_id").assert_i64(bob_id);

    // Bob edits descriptive fields; his attempt to hand the location to alice is ignored
    let bob = app.login("bob", "bob-password").await;
    let resp = app
        .put(&path, &bob, json!({ "name": "B", "address": "X", "table_count": 5, "manager_id": alice_id }))
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("name").assert_string("B");
    body.value().object().get("manager_id").assert_i64(bob_id);

    // Carol is neither admin nor manager
    let carol = app.login("carol", "carol-password").await;
    let resp = app
        .put(&path, &carol, json!({ "name": "B", "address": "X", "table_count": 5, "manager_id": alice_id }))
        .await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;

    let resp = app.get(&path, None).await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("name").assert_string("B");
    body.value().object().get("manager_id").assert_i64(bob_id);
}

#[tokio::test]
async fn test_non_admin_forbidden_regardless_of_body() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    app.create_user(&admin, "dave", "dave-password", &["User"]).await;
    let dave = app.login("dave", "dave-password").await;

    let resp = app
        .post("/api/locations", &dave, json!({ "name": "", "address": "", "table_count": -1 }))
        .await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;

    let resp = app
        .post("/api/locations", &dave, json!({ "name": "A", "table_count": "lots" }))
        .await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;

    for body in [
        json!({ "name": "B" }),
        json!({ "name": "B", "manager_id": 1 }),
        json!({ "name": "", "table_count": -1 }),
        json!({ "name": "B", "address": "X", "table_count": "lots" }),
        json!({}),
    ] {
        let resp = app.put("/api/locations/1", &dave, body).await;
        assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;
    }

    let resp = app.delete("/api/locations/1", &dave).await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;

    let resp = app.get("/api/locations/1", None).await;
    resp.json().await.value().object().get("name").assert_string("Location 1");
}

#[tokio::test]
async fn test_ownership_walkthrough_with_partial_bodies() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let alice_id = app.create_user(&admin, "alice", "alice-password", &["Admin"]).await;
    let bob_id = app.create_user(&admin, "bob", "bob-password", &["User"]).await;
    app.create_user(&admin, "carol", "carol-password", &["User"]).await;

    let alice = app.login("alice", "alice-password").await;
    let resp = app
        .post("/api/locations", &alice, json!({ "name": "A", "address": "X", "table_count": 5 }))
        .await;
    resp.assert_status(StatusCode::CREATED);
    let location_id = resp.json().await.value().object().get("id").i64();
    let path = format!("/api/locations/{}", location_id);

    let resp = app.put(&path, &alice, json!({ "manager_id": bob_id })).await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("manager_id").assert_i64(bob_id);
    body.value().object().get("name").assert_string("A");

    let bob = app.login("bob", "bob-password").await;
    let resp = app.put(&path, &bob, json!({ "name": "B", "manager_id": alice_id })).await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("name").assert_string("B");
    body.value().object().get("address").assert_string("X");
    body.value().object().get("manager_id").assert_i64(bob_id);

    let carol = app.login("carol", "carol-password").await;
    let resp = app.put(&path, &carol, json!({ "name": "B", "manager_id": alice_id })).await;
    assert_error(resp, StatusCode::FORBIDDEN, "forbidden").await;
}

#[tokio::test]
async fn test_admin_malformed_body_is_bad_request() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let resp = app
        .put("/api/locations/1", &admin, json!({ "table_count": "lots" }))
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "validation_failed").await;

    let resp = app.post("/api/locations", &admin, json!({ "name": "A" })).await;
    assert_error(resp, StatusCode::BAD_REQUEST, "validation_failed").await;

    let resp = app.put("/api/locations/999", &admin, json!({ "table_count": "lots" })).await;
    assert_error(resp, StatusCode::NOT_FOUND, "location_not_found").await;
}

#[tokio::test]
async fn test_public_reads_need_no_token() {
    let app = spawn_app().await;

    let resp = app.get("/api/locations", None).await;
    resp.assert_status_is_ok();
    resp.json().await.value().array().assert_len(3);

    let resp = app.get("/api/locations/1", None).await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("name").assert_string("Location 1");

    let resp = app.get("/api/locations/999", None).await;
    assert_error(resp, StatusCode::NOT_FOUND, "location_not_found").await;
}

#[tokio::test]
async fn test_create_with_unknown_manager_rejected() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let resp = app
        .post(
            "/api/locations",
            &admin,
            json!({ "name": "A", "address": "X", "table_count": 5, "manager_id": 4242 }),
        )
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "unknown_owner").await;
}

#[tokio::test]
async fn test_admin_validation_and_delete() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;

    let resp = app
        .post("/api/locations", &admin, json!({ "name": "  ", "address": "X", "table_count": 5 }))
        .await;
    assert_error(resp, StatusCode::BAD_REQUEST, "validation_failed").await;

    let resp = app.delete("/api/locations/2", &admin).await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = app.get("/api/locations/2", None).await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_manager_cannot_be_deleted_while_assigned() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let erin_id = app.create_user(&admin, "erin", "erin-password", &["User"]).await;

    let resp = app
        .put(
            "/api/locations/1",
            &admin,
            json!({ "name": "Location 1", "address": "123 Main St", "table_count": 10, "manager_id": erin_id }),
        )
        .await;
    resp.assert_status_is_ok();

    let resp = app.delete(&format!("/api/users/{}", erin_id), &admin).await;
    assert_error(resp, StatusCode::CONFLICT, "user_manages_locations").await;

    // Omitting the manager keeps it
    let resp = app.put("/api/locations/1", &admin, json!({ "table_count": 12 })).await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("manager_id").assert_i64(erin_id);

    // Clearing the manager releases the user
    let resp = app.put("/api/locations/1", &admin, json!({ "manager_id": null })).await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("manager_id").assert_null();

    let resp = app.delete(&format!("/api/users/{}", erin_id), &admin).await;
    resp.assert_status(StatusCode::NO_CONTENT);
}
