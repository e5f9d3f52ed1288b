//! HTTP API Handlers and Routes
//!
//! The REST layer for FitTrack, built on Axum.
//!
//! # API Endpoints
//!
//! ## Open
//! - `GET /health` - Health check
//! - `POST /users` - Register a user
//! - `POST /tokens/authentication` - Exchange username/password for a token
//! - `GET /openapi.json` - OpenAPI document
//!
//! ## Protected
//! - `POST /workouts` - Create a workout
//! - `GET /workouts/{id}` - Fetch one of your workouts
//! - `PUT /workouts/{id}` - Update one of your workouts
//! - `DELETE /workouts/{id}` - Delete one of your workouts
//!
//! # Authentication
//!
//! Protected endpoints require a token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//! A missing, malformed, expired, or otherwise invalid token gets the same
//! `401 {"error": "authentication required"}`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI document.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;
