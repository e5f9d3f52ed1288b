//! Shared helpers for the integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use fittrack::{api::routes::create_router, db::TursoClient, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-at-least-32-bytes";
pub const TEST_TTL_SECS: i64 = 900;

/// A test server over a fresh in-memory database, plus its state so tests can
/// reach the token codec directly.
pub async fn create_test_server() -> (TestServer, AppState) {
    let db = Arc::new(
        TursoClient::new_memory()
            .await
            .expect("Failed to create in-memory database"),
    );

    let state = AppState::new(db.clone(), db, TEST_SECRET, TEST_TTL_SECS)
        .expect("Failed to build app state");

    let server =
        TestServer::new(create_router(state.clone())).expect("Failed to create test server");

    (server, state)
}

pub async fn register(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/tokens/authentication")
        .json(&json!({
            "username": username,
            "password": password,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn sample_workout() -> Value {
    json!({
        "title": "Morning run",
        "description": "Easy 5k",
        "duration_minutes": 30,
        "calories_burned": 300,
        "entries": [
            {
                "exercise_name": "Run",
                "sets": 1,
                "duration_seconds": 1800,
                "order_index": 1
            },
            {
                "exercise_name": "Push-up",
                "sets": 3,
                "reps": 15,
                "order_index": 2
            }
        ]
    })
}
