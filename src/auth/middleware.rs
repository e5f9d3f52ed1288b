use crate::auth::context::AuthContext;
use crate::auth::jwt::TokenCodec;
use crate::db::CredentialStore;
use crate::types::{AppError, User};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};

/// The only rejection text the gate ever produces, whatever the cause.
pub const AUTH_REQUIRED: &str = "authentication required";

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// Returns `None` for a missing header, a non-ASCII value, any other scheme,
/// or an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Decides who made a request. Never fails: every problem reads as anonymous.
pub async fn resolve_identity(
    codec: &TokenCodec,
    store: &dyn CredentialStore,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> AuthContext {
    let Some(token) = bearer_token(headers) else {
        return AuthContext::Anonymous;
    };

    let user_id = match codec.parse(token, now) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(reason = %e, "bearer token rejected");
            return AuthContext::Anonymous;
        }
    };

    match store.find_by_id(&user_id).await {
        Ok(Some(user)) => AuthContext::User(user),
        Ok(None) => {
            tracing::debug!(user_id = %user_id, "token subject no longer exists");
            AuthContext::Anonymous
        }
        Err(e) => {
            tracing::warn!(error = %e, "user lookup failed during authentication");
            AuthContext::Anonymous
        }
    }
}

/// Runs on every route: attaches an [`AuthContext`] and always continues.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let ctx = resolve_identity(
        &state.codec,
        state.credentials.as_ref(),
        req.headers(),
        Utc::now(),
    )
    .await;

    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Gate for protected routes. Rejects anything without a resolved user before
/// the handler runs.
pub async fn require_user(req: Request, next: Next) -> Result<Response, AppError> {
    match req.extensions().get::<AuthContext>() {
        Some(AuthContext::User(_)) => Ok(next.run(req).await),
        _ => Err(AppError::Unauthorized(AUTH_REQUIRED.to_string())),
    }
}

/// Extractor for the authenticated user on protected handlers.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .and_then(AuthContext::user)
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized(AUTH_REQUIRED.to_string()))
    }
}
