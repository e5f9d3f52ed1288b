//! # FitTrack
//!
//! A personal workout tracking API built on Axum, with stateless JWT
//! authentication.
//!
//! ## Overview
//!
//! FitTrack can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `fittrack-server` binary
//! 2. **As a library** - Build the router yourself, e.g. in integration tests
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use fittrack::{api::routes::create_router, db::TursoClient, AppState};
//! use std::sync::Arc;
//!
//! let db = Arc::new(TursoClient::new_memory().await?);
//! let state = AppState::new(db.clone(), db, b"a-signing-secret-of-at-least-32-bytes", 3600)?;
//! let app = create_router(state);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers and routes
//! - [`auth`] - token codec, issuance, authentication middleware, authorization gate
//! - [`db`] - credential and workout stores (libsql)
//! - [`types`] - request/response types and error handling
//! - [`utils`] - configuration and logging setup

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Authentication and authorization core.
pub mod auth;
/// Database clients.
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

pub use auth::{AuthContext, TokenCodec, TokenIssuer};
pub use db::{CredentialStore, TursoClient, WorkoutStore};
pub use types::{AppError, Result};
pub use utils::toml_config::FitTrackConfig;

use std::sync::Arc;

/// Application state shared across handlers
///
/// Everything in here is built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// User records and password hashes
    pub credentials: Arc<dyn CredentialStore>,
    /// Workout records
    pub workouts: Arc<dyn WorkoutStore>,
    /// Token signing and verification
    pub codec: Arc<TokenCodec>,
    /// Username/password to token exchange
    pub issuer: Arc<TokenIssuer>,
}

impl AppState {
    /// Wires the auth core on top of the given stores.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        workouts: Arc<dyn WorkoutStore>,
        jwt_secret: &[u8],
        token_ttl_secs: i64,
    ) -> Result<Self> {
        let codec = Arc::new(
            TokenCodec::new(jwt_secret, token_ttl_secs)
                .map_err(|e| AppError::InvalidInput(e.to_string()))?,
        );
        let issuer = Arc::new(TokenIssuer::new(credentials.clone(), codec.clone())?);

        Ok(Self {
            credentials,
            workouts,
            codec,
            issuer,
        })
    }
}
