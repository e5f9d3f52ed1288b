//! Database abstraction traits
//!
//! The HTTP layer and the auth core only see these traits. [`TursoClient`]
//! implements both against libsql; tests use the same client over an
//! in-memory database.
//!
//! # Example
//!
//! ```rust,ignore
//! use fittrack::db::{DatabaseProvider, CredentialStore};
//!
//! let db = DatabaseProvider::Memory.create_client().await?;
//! let user = db.find_by_username("alice").await?;
//! ```
//!
//! [`TursoClient`]: super::turso::TursoClient

use crate::types::{AppError, NewUser, UpdateWorkoutRequest, User, Workout, WorkoutEntry};
use async_trait::async_trait;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a database client from this provider configuration
    pub async fn create_client(&self) -> Result<super::turso::TursoClient, StoreError> {
        match self {
            DatabaseProvider::Memory => super::turso::TursoClient::new_memory().await,
            DatabaseProvider::SQLite { path } => super::turso::TursoClient::new_local(path).await,
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await
            }
        }
    }

    /// Picks a provider from a configured database URL.
    ///
    /// `:memory:` (or an empty string) selects the in-memory database,
    /// `libsql://` URLs select Turso when that feature is compiled in, and
    /// anything else is treated as a local file path.
    pub fn from_url(url: &str) -> Self {
        #[cfg(feature = "turso")]
        {
            if url.starts_with("libsql://") {
                if let Ok(token) = std::env::var("TURSO_AUTH_TOKEN") {
                    if !token.is_empty() {
                        return DatabaseProvider::Turso {
                            url: url.to_string(),
                            auth_token: token,
                        };
                    }
                }
            }
        }

        if url.is_empty() || url == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: url.to_string(),
            }
        }
    }
}

/// Failures surfaced by the stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The username is already taken. Enforced by a unique index.
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// Any driver or schema failure.
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername(username) => {
                AppError::Conflict(format!("username '{}' is already taken", username))
            }
            StoreError::NotFound => AppError::NotFound("record not found".to_string()),
            StoreError::Backend(msg) => AppError::Database(msg),
        }
    }
}

/// Holds user identity records and their password hashes.
///
/// Implementations must be safe for concurrent reads, and `create` must reject
/// a second user with the same username atomically (at the storage level).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by username. `Ok(None)` means no such user.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id. `Ok(None)` means no such user.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user, failing with [`StoreError::DuplicateUsername`] if the
    /// username is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Input for creating a workout.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i64,
    pub calories_burned: Option<i64>,
    pub entries: Vec<WorkoutEntry>,
}

/// Workout persistence. Ownership checks live in the handlers, not here.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, StoreError>;

    async fn get_workout(&self, id: &str) -> Result<Option<Workout>, StoreError>;

    /// Apply a partial update. Fails with [`StoreError::NotFound`] if the
    /// workout disappeared.
    async fn update_workout(
        &self,
        id: &str,
        update: UpdateWorkoutRequest,
    ) -> Result<Workout, StoreError>;

    /// Returns `false` if nothing was deleted.
    async fn delete_workout(&self, id: &str) -> Result<bool, StoreError>;
}
