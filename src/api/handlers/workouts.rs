//! Workout CRUD handlers.
//!
//! Every handler here sits behind `require_user`; ownership is checked against
//! the caller from [`CurrentUser`].

use crate::{
    auth::middleware::CurrentUser,
    db::NewWorkout,
    types::{
        AppError, CreateWorkoutRequest, Result, UpdateWorkoutRequest, User, Workout, WorkoutEntry,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

fn validate_entries(entries: &[WorkoutEntry]) -> Result<()> {
    entries.iter().try_for_each(WorkoutEntry::validate)
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_duration(minutes: i64) -> Result<()> {
    if minutes < 0 {
        return Err(AppError::InvalidInput(
            "duration_minutes must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// Loads a workout and checks that `user` owns it.
async fn owned_workout(state: &AppState, id: &str, user: &User) -> Result<Workout> {
    let workout = state
        .workouts
        .get_workout(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("workout '{}' not found", id)))?;

    if workout.user_id != user.id {
        tracing::debug!(workout_id = %id, user_id = %user.id, "workout ownership check failed");
        return Err(AppError::Forbidden(
            "you are not allowed to access this workout".to_string(),
        ));
    }

    Ok(workout)
}

/// Get a workout owned by the caller
#[utoipa::path(
    get,
    path = "/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout ID")
    ),
    responses(
        (status = 200, description = "Workout details", body = Workout),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts",
    security(("bearer" = []))
)]
pub async fn get_workout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Workout>> {
    let workout = owned_workout(&state, &id, &user).await?;
    Ok(Json(workout))
}

/// Create a workout for the caller
#[utoipa::path(
    post,
    path = "/workouts",
    request_body = CreateWorkoutRequest,
    responses(
        (status = 201, description = "Workout created", body = Workout),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "workouts",
    security(("bearer" = []))
)]
pub async fn create_workout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>)> {
    validate_title(&payload.title)?;
    validate_duration(payload.duration_minutes)?;
    validate_entries(&payload.entries)?;

    let workout = state
        .workouts
        .create_workout(NewWorkout {
            user_id: user.id,
            title: payload.title,
            description: payload.description,
            duration_minutes: payload.duration_minutes,
            calories_burned: payload.calories_burned,
            entries: payload.entries,
        })
        .await?;

    tracing::info!(workout_id = %workout.id, user_id = %workout.user_id, "created workout");

    Ok((StatusCode::CREATED, Json(workout)))
}

/// Update a workout owned by the caller
#[utoipa::path(
    put,
    path = "/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout ID")
    ),
    request_body = UpdateWorkoutRequest,
    responses(
        (status = 200, description = "Workout updated", body = Workout),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts",
    security(("bearer" = []))
)]
pub async fn update_workout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateWorkoutRequest>,
) -> Result<Json<Workout>> {
    if let Some(title) = &payload.title {
        validate_title(title)?;
    }
    if let Some(minutes) = payload.duration_minutes {
        validate_duration(minutes)?;
    }
    if let Some(entries) = &payload.entries {
        validate_entries(entries)?;
    }

    owned_workout(&state, &id, &user).await?;

    let workout = state.workouts.update_workout(&id, payload).await?;

    Ok(Json(workout))
}

/// Delete a workout owned by the caller
#[utoipa::path(
    delete,
    path = "/workouts/{id}",
    params(
        ("id" = String, Path, description = "Workout ID")
    ),
    responses(
        (status = 204, description = "Workout deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    ),
    tag = "workouts",
    security(("bearer" = []))
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    owned_workout(&state, &id, &user).await?;

    if !state.workouts.delete_workout(&id).await? {
        return Err(AppError::NotFound(format!("workout '{}' not found", id)));
    }

    tracing::info!(workout_id = %id, user_id = %user.id, "deleted workout");

    Ok(StatusCode::NO_CONTENT)
}
