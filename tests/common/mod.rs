// Common test utilities for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use poem::Route;
use poem::http::StatusCode;
use poem::test::{TestClient, TestResponse};
use sea_orm::Database;
use serde_json::{Value, json};

use locations_backend::AppData;
use locations_backend::api::build_routes;
use locations_backend::cli::{SeedSettings, seed_database};
use locations_backend::config::{EnvironmentProvider, SecretManager, migrate_database};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

const TEST_JWT_SECRET: &str = "integration-test-secret-minimum-32-chars";
const TEST_PEPPER: &str = "integration-pepper-value";

/// Environment backed by a map, so tests never touch process env vars
pub struct MapEnvironment(HashMap<String, String>);

impl MapEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl EnvironmentProvider for MapEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// A seeded application over an in-memory database, driven through HTTP
pub struct TestApp {
    pub client: TestClient<Route>,
    pub app_data: Arc<AppData>,
}

/// Build a seeded app with the default session lifetime
pub async fn spawn_app() -> TestApp {
    spawn_app_with_ttl(Duration::minutes(15)).await
}

pub async fn spawn_app_with_ttl(session_ttl: Duration) -> TestApp {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    migrate_database(&db).await.expect("Failed to run migrations");

    let secret_manager = SecretManager::new(TEST_JWT_SECRET, TEST_PEPPER).expect("Test secrets are valid");
    let app_data = Arc::new(AppData::new(db, Arc::new(secret_manager), session_ttl));

    let seed_env = MapEnvironment::new(&[
        ("SEED_ADMIN_USERNAME", ADMIN_USERNAME),
        ("SEED_ADMIN_PASSWORD", ADMIN_PASSWORD),
    ]);
    seed_database(&app_data, &SeedSettings::from_env_provider(&seed_env))
        .await
        .expect("Failed to seed test database");

    TestApp {
        client: TestClient::new(build_routes(app_data.clone(), "http://localhost:3000/api")),
        app_data,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

impl TestApp {
    /// POST /api/sessions and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let resp = self
            .client
            .post("/api/sessions")
            .body_json(&json!({ "username": username, "password": password }))
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("access_token")
            .string()
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Create a user through the admin endpoint and return its id
    pub async fn create_user(&self, admin_token: &str, username: &str, password: &str, roles: &[&str]) -> i64 {
        let resp = self
            .client
            .post("/api/users")
            .header("Authorization", bearer(admin_token))
            .body_json(&json!({ "username": username, "password": password, "roles": roles }))
            .send()
            .await;
        resp.assert_status_is_ok();
        resp.json().await.value().object().get("id").i64()
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = self.client.get(path);
        if let Some(token) = token {
            req = req.header("Authorization", bearer(token));
        }
        req.send().await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.client
            .post(path)
            .header("Authorization", bearer(token))
            .body_json(&body)
            .send()
            .await
    }

    pub async fn put(&self, path: &str, token: &str, body: Value) -> TestResponse {
        self.client
            .put(path)
            .header("Authorization", bearer(token))
            .body_json(&body)
            .send()
            .await
    }

    pub async fn put_empty(&self, path: &str, token: &str) -> TestResponse {
        self.client
            .put(path)
            .header("Authorization", bearer(token))
            .send()
            .await
    }

    pub async fn delete(&self, path: &str, token: &str) -> TestResponse {
        self.client
            .delete(path)
            .header("Authorization", bearer(token))
            .send()
            .await
    }
}

/// Assert the error body shape and reason code
pub async fn assert_error(resp: TestResponse, status: StatusCode, error: &str) {
    resp.assert_status(status);
    let body = resp.json().await;
    let object = body.value().object();
    object.get("error").assert_string(error);
    object.get("status_code").assert_i64(status.as_u16() as i64);
    assert!(!object.get("message").string().is_empty());
}
