use super::traits::{CredentialStore, NewWorkout, StoreError, WorkoutStore};
use crate::types::{NewUser, UpdateWorkoutRequest, User, Workout, WorkoutEntry};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database, Row};
use uuid::Uuid;

/// libsql-backed store for users and workouts.
///
/// A single connection is opened at construction and shared by every request;
/// an in-memory database only lives as long as that connection.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self, StoreError> {
        Self::new_local(":memory:").await
    }

    /// Opens (or creates) a SQLite file at `path`.
    pub async fn new_local(path: &str) -> Result<Self, StoreError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StoreError::Backend(format!("Failed to create database directory: {}", e))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to open database: {}", e)))?;

        Self::from_database(db).await
    }

    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self, StoreError> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to connect to Turso: {}", e)))?;

        Self::from_database(db).await
    }

    async fn from_database(db: Database) -> Result<Self, StoreError> {
        let conn = db
            .connect()
            .map_err(|e| StoreError::Backend(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        Ok(client)
    }

    async fn initialize_schema(&self) -> Result<(), StoreError> {
        // Users table. The UNIQUE index on username is what serializes
        // concurrent registrations.
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT PRIMARY KEY,
                    username TEXT UNIQUE NOT NULL,
                    email TEXT NOT NULL,
                    bio TEXT,
                    password_hash TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                )",
                (),
            )
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to create users table: {}", e)))?;

        // Workouts table, entries kept as a JSON array
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS workouts (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT,
                    duration_minutes INTEGER NOT NULL,
                    calories_burned INTEGER,
                    entries TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL,
                    FOREIGN KEY (user_id) REFERENCES users(id)
                )",
                (),
            )
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to create workouts table: {}", e)))?;

        Ok(())
    }

    async fn query_user(&self, sql: &str, value: &str) -> Result<Option<User>, StoreError> {
        let mut rows = self
            .conn
            .query(sql, [value])
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to query user: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
        {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn is_unique_violation(err: &libsql::Error) -> bool {
    err.to_string().contains("UNIQUE constraint failed")
}

fn backend(e: libsql::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn user_from_row(row: &Row) -> Result<User, StoreError> {
    Ok(User {
        id: row.get(0).map_err(backend)?,
        username: row.get(1).map_err(backend)?,
        email: row.get(2).map_err(backend)?,
        bio: row.get(3).map_err(backend)?,
        password_hash: row.get(4).map_err(backend)?,
        created_at: row.get(5).map_err(backend)?,
        updated_at: row.get(6).map_err(backend)?,
    })
}

fn workout_from_row(row: &Row) -> Result<Workout, StoreError> {
    let entries: String = row.get(6).map_err(backend)?;
    let entries: Vec<WorkoutEntry> = serde_json::from_str(&entries)
        .map_err(|e| StoreError::Backend(format!("Corrupt workout entries: {}", e)))?;

    Ok(Workout {
        id: row.get(0).map_err(backend)?,
        user_id: row.get(1).map_err(backend)?,
        title: row.get(2).map_err(backend)?,
        description: row.get(3).map_err(backend)?,
        duration_minutes: row.get(4).map_err(backend)?,
        calories_burned: row.get(5).map_err(backend)?,
        entries,
        created_at: row.get(7).map_err(backend)?,
        updated_at: row.get(8).map_err(backend)?,
    })
}

fn encode_entries(entries: &[WorkoutEntry]) -> Result<String, StoreError> {
    serde_json::to_string(entries)
        .map_err(|e| StoreError::Backend(format!("Failed to encode workout entries: {}", e)))
}

#[async_trait]
impl CredentialStore for TursoClient {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.query_user(
            "SELECT id, username, email, bio, password_hash, created_at, updated_at
             FROM users WHERE username = ?",
            username,
        )
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.query_user(
            "SELECT id, username, email, bio, password_hash, created_at, updated_at
             FROM users WHERE id = ?",
            id,
        )
        .await
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT INTO users (id, username, email, bio, password_hash, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                (
                    id.as_str(),
                    user.username.as_str(),
                    user.email.as_str(),
                    user.bio.as_deref(),
                    user.password_hash.as_str(),
                    now,
                    now,
                ),
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateUsername(user.username.clone())
                } else {
                    StoreError::Backend(format!("Failed to create user: {}", e))
                }
            })?;

        Ok(User {
            id,
            username: user.username,
            email: user.email,
            bio: user.bio,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        })
    }
}

#[async_trait]
impl WorkoutStore for TursoClient {
    async fn create_workout(&self, workout: NewWorkout) -> Result<Workout, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();
        let entries = encode_entries(&workout.entries)?;

        self.conn
            .execute(
                "INSERT INTO workouts
                 (id, user_id, title, description, duration_minutes, calories_burned, entries, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                (
                    id.as_str(),
                    workout.user_id.as_str(),
                    workout.title.as_str(),
                    workout.description.as_deref(),
                    workout.duration_minutes,
                    workout.calories_burned,
                    entries.as_str(),
                    now,
                    now,
                ),
            )
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to create workout: {}", e)))?;

        Ok(Workout {
            id,
            user_id: workout.user_id,
            title: workout.title,
            description: workout.description,
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            entries: workout.entries,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_workout(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, user_id, title, description, duration_minutes, calories_burned,
                        entries, created_at, updated_at
                 FROM workouts WHERE id = ?",
                [id],
            )
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to query workout: {}", e)))?;

        match rows.next().await.map_err(backend)? {
            Some(row) => Ok(Some(workout_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn update_workout(
        &self,
        id: &str,
        update: UpdateWorkoutRequest,
    ) -> Result<Workout, StoreError> {
        let entries = update
            .entries
            .as_deref()
            .map(encode_entries)
            .transpose()?;

        // One statement, so concurrent partial updates to different fields
        // both land.
        let changed = self
            .conn
            .execute(
                "UPDATE workouts
                 SET title = COALESCE(?, title),
                     description = COALESCE(?, description),
                     duration_minutes = COALESCE(?, duration_minutes),
                     calories_burned = COALESCE(?, calories_burned),
                     entries = COALESCE(?, entries),
                     updated_at = ?
                 WHERE id = ?",
                (
                    update.title.as_deref(),
                    update.description.as_deref(),
                    update.duration_minutes,
                    update.calories_burned,
                    entries.as_deref(),
                    Utc::now().timestamp(),
                    id,
                ),
            )
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to update workout: {}", e)))?;

        if changed == 0 {
            return Err(StoreError::NotFound);
        }

        self.get_workout(id).await?.ok_or(StoreError::NotFound)
    }

    async fn delete_workout(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?", [id])
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to delete workout: {}", e)))?;

        Ok(deleted > 0)
    }
}
