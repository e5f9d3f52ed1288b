//! Database integration tests
//!
//! These drive the stores through their trait objects, the same way the
//! handlers and the auth core see them.

use chrono::Utc;
use fittrack::auth::password::hash_password;
use fittrack::db::{CredentialStore, DatabaseProvider, NewWorkout, StoreError, WorkoutStore};
use fittrack::types::{AppError, NewUser, UpdateWorkoutRequest, WorkoutEntry};
use fittrack::{TokenCodec, TokenIssuer};
use std::sync::Arc;

const SECRET: &[u8] = b"db-test-secret-that-is-long-enough!!";

async fn open(provider: DatabaseProvider) -> Arc<fittrack::TursoClient> {
    Arc::new(
        provider
            .create_client()
            .await
            .expect("Failed to create database client"),
    )
}

fn new_user(username: &str, password: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        bio: None,
        password_hash: hash_password(password).expect("hash"),
    }
}

#[tokio::test]
async fn test_memory_provider_stores_users() {
    let db = open(DatabaseProvider::from_url(":memory:")).await;
    let store: Arc<dyn CredentialStore> = db;

    let created = store.create(new_user("alice", "secret123")).await.unwrap();

    let by_name = store.find_by_username("alice").await.unwrap().unwrap();
    let by_id = store.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);
    assert_eq!(by_id.username, "alice");
    assert!(store.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let db = open(DatabaseProvider::Memory).await;
    let store: Arc<dyn CredentialStore> = db;

    store.create(new_user("alice", "secret123")).await.unwrap();
    let err = store
        .create(new_user("alice", "another-password"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::DuplicateUsername(ref name) if name == "alice"));
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("fittrack.db");
    let url = path.to_string_lossy().to_string();

    let id = {
        let store: Arc<dyn CredentialStore> = open(DatabaseProvider::from_url(&url)).await;
        store.create(new_user("alice", "secret123")).await.unwrap().id
    };

    let store: Arc<dyn CredentialStore> = open(DatabaseProvider::from_url(&url)).await;
    let user = store.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn test_issuer_over_stored_credentials() {
    let db = open(DatabaseProvider::Memory).await;
    let store: Arc<dyn CredentialStore> = db;
    let alice = store.create(new_user("alice", "secret123")).await.unwrap();

    let codec = Arc::new(TokenCodec::new(SECRET, 3600).unwrap());
    let issuer = TokenIssuer::new(store.clone(), codec.clone()).unwrap();

    let now = Utc::now();
    let issued = issuer.issue("alice", "secret123", now).await.unwrap();
    assert_eq!(codec.parse(&issued.token, now).unwrap(), alice.id);

    let wrong = issuer.issue("alice", "secret124", now).await.unwrap_err();
    let unknown = issuer.issue("mallory", "secret123", now).await.unwrap_err();
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[tokio::test]
async fn test_workout_lifecycle() {
    let db = open(DatabaseProvider::Memory).await;
    let users: Arc<dyn CredentialStore> = db.clone();
    let workouts: Arc<dyn WorkoutStore> = db;
    let owner = users.create(new_user("alice", "secret123")).await.unwrap();

    let created = workouts
        .create_workout(NewWorkout {
            user_id: owner.id.clone(),
            title: "Legs".to_string(),
            description: None,
            duration_minutes: 50,
            calories_burned: Some(420),
            entries: vec![WorkoutEntry {
                exercise_name: "Squat".to_string(),
                sets: 5,
                reps: Some(5),
                duration_seconds: None,
                weight: Some(100.0),
                notes: None,
                order_index: 1,
            }],
        })
        .await
        .unwrap();
    assert_eq!(created.user_id, owner.id);

    let updated = workouts
        .update_workout(
            &created.id,
            UpdateWorkoutRequest {
                description: Some("Heavy day".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Legs");
    assert_eq!(updated.description.as_deref(), Some("Heavy day"));
    assert_eq!(updated.entries.len(), 1);

    assert!(workouts.delete_workout(&created.id).await.unwrap());
    assert!(!workouts.delete_workout(&created.id).await.unwrap());
    assert!(workouts.get_workout(&created.id).await.unwrap().is_none());
}
