use crate::{
    auth::password,
    types::{
        AppError, NewUser, RegisterRequest, Result, TokenRequest, TokenResponse, UserResponse,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

const MAX_USERNAME_LEN: usize = 50;
const MIN_PASSWORD_LEN: usize = 8;

fn validate_registration(payload: &RegisterRequest) -> Result<()> {
    let username = payload.username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::InvalidInput(format!(
            "username must be between 1 and {} characters",
            MAX_USERNAME_LEN
        )));
    }
    if !payload.email.contains('@') {
        return Err(AppError::InvalidInput("a valid email is required".to_string()));
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    validate_registration(&payload)?;

    let password_hash = password::hash_password_blocking(payload.password).await?;

    // Uniqueness is left to the store so concurrent registrations can't race
    // past a check-then-insert.
    let user = state
        .credentials
        .create(NewUser {
            username: payload.username.trim().to_string(),
            email: payload.email,
            bio: payload.bio,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "registered user");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/tokens/authentication",
    request_body = TokenRequest,
    responses(
        (status = 201, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn create_token(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let issued = state
        .issuer
        .issue(&payload.username, &payload.password, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token: issued.token,
            expires_at: issued.expires_at.timestamp(),
        }),
    ))
}
