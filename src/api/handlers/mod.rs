//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Registration and token issuance handlers.
pub mod auth;
/// Health check handler.
pub mod health;
/// Workout CRUD handlers.
pub mod workouts;
