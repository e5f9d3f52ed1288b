//! Authentication and authorization core
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - HS256 token minting and verification
//! - [`auth::password`](crate::auth::password) - Argon2id hashing
//! - [`auth::service`](crate::auth::service) - username/password to token exchange
//! - [`auth::context`](crate::auth::context) - per-request identity
//! - [`auth::middleware`](crate::auth::middleware) - Axum layers and extractors
//!
//! # Request flow
//!
//! ```text
//! request -> authenticate (every route) -> require_user (protected only) -> handler
//! ```
//!
//! `authenticate` never rejects. It attaches an [`AuthContext`] that is either
//! a resolved user or `Anonymous`; a missing header, a bad signature, an
//! expired token and a token for a deleted user all end up as `Anonymous`.
//! Only `require_user` turns that into a 401, and it says the same thing in
//! every case.
//!
//! ## Protecting routes
//!
//! ```ignore
//! use axum::middleware;
//! use fittrack::auth::middleware::{authenticate, require_user, CurrentUser};
//!
//! let protected = Router::new()
//!     .route("/workouts", post(create_workout))
//!     .route_layer(middleware::from_fn(require_user));
//!
//! let app = Router::new()
//!     .route("/health", get(health))
//!     .merge(protected)
//!     .layer(middleware::from_fn_with_state(state.clone(), authenticate))
//!     .with_state(state);
//!
//! async fn create_workout(CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     format!("Hello, {}!", user.username)
//! }
//! ```

/// Per-request identity attached by the authentication middleware.
pub mod context;
/// JWT token minting and verification.
pub mod jwt;
/// Authentication middleware, authorization gate, and extractors.
pub mod middleware;
/// Argon2id password hashing.
pub mod password;
/// Token issuance from username and password.
pub mod service;

pub use context::AuthContext;
pub use jwt::{TokenCodec, TokenError};
pub use middleware::CurrentUser;
pub use service::{IssuedToken, TokenIssuer};
