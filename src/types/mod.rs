use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= User Types =============

/// A stored user account.
///
/// `password_hash` is an Argon2id PHC string. It is skipped on serialization
/// so a `User` can never leak its hash through a JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Input for creating a user in the credential store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub password_hash: String,
}

// ============= Workout Types =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub calories_burned: Option<i64>,
    pub entries: Vec<WorkoutEntry>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WorkoutEntry {
    pub exercise_name: String,
    pub sets: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub order_index: i64,
}

impl WorkoutEntry {
    /// Checks that the entry is either rep-based or time-based, never both.
    pub fn validate(&self) -> Result<()> {
        if self.exercise_name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "exercise_name must not be empty".to_string(),
            ));
        }
        if self.sets <= 0 {
            return Err(AppError::InvalidInput(format!(
                "sets must be positive for '{}'",
                self.exercise_name
            )));
        }
        match (self.reps, self.duration_seconds) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            _ => Err(AppError::InvalidInput(format!(
                "exactly one of reps or duration_seconds must be set for '{}'",
                self.exercise_name
            ))),
        }
    }
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Public view of a user, returned by registration.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    /// Unix timestamp (seconds) after which the token is rejected.
    pub expires_at: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateWorkoutRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub duration_minutes: i64,
    #[serde(default)]
    pub calories_burned: Option<i64>,
    #[serde(default)]
    pub entries: Vec<WorkoutEntry>,
}

/// Partial update. Absent fields are left unchanged; `entries` replaces the
/// whole list when present.
///
/// An explicit `null` reads the same as an absent field, so `description`
/// and `calories_burned` can be changed but not cleared once set. Clearing
/// them takes a delete and re-create.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateWorkoutRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i64>,
    pub calories_burned: Option<i64>,
    pub entries: Option<Vec<WorkoutEntry>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// JWT claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
