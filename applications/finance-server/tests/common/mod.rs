//! Common test utilities and fixtures

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use campus_finance_server::{create_router, services::AuthService, state::AppState};
use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// A router over a fresh SQLite file
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub auth_service: Arc<AuthService>,
    _temp_dir: TempDir,
}

/// Create a test database with migrations applied
///
/// Uses a real file: every pooled connection to `:memory:` would get its own database.
pub async fn create_test_database() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let pool = campus_storage::connect(&db_url)
        .await
        .expect("Failed to open test database");
    (pool, temp_dir)
}

pub fn create_test_auth_service() -> AuthService {
    // Minimum bcrypt cost keeps the suite fast
    AuthService::new(fixtures::JWT_SECRET.to_string(), Duration::minutes(60), 4)
}

pub async fn create_test_app() -> TestApp {
    let (pool, temp_dir) = create_test_database().await;
    let auth_service = Arc::new(create_test_auth_service());
    let router = create_router(AppState::new(pool.clone(), Arc::clone(&auth_service)));

    TestApp {
        router,
        pool,
        auth_service,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    /// Send one request and return the status and decoded JSON body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn signup(&self, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
        self.post_json(
            "POST",
            "/signup",
            None,
            serde_json::json!({
                "username": username,
                "password": password,
                "full_name": format!("{} Example", username),
                "role": "Admin"
            }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={}&password={}", username, password)))
            .unwrap();
        self.send(request).await
    }

    /// Sign up a user and return a bearer token for it
    pub async fn signed_in(&self, username: &str) -> String {
        let (status, _) = self.signup(username, fixtures::TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.login(username, fixtures::TEST_PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }
}

/// Test user credentials
pub mod fixtures {
    pub const JWT_SECRET: &str = "test-secret-key";
    pub const TEST_USERNAME: &str = "alice";
    pub const TEST_PASSWORD: &str = "pw1";
}
