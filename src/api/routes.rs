use crate::api::handlers::{auth, health, workouts};
use crate::api::openapi::ApiDoc;
use crate::auth::middleware::{authenticate, require_user};
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Request bodies larger than this are rejected before any handler runs.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the full application router.
///
/// `authenticate` wraps every route so open endpoints still see who is
/// calling; `require_user` is layered only on the workout routes.
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/workouts", post(workouts::create_workout))
        .route(
            "/workouts/{id}",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        )
        .route_layer(middleware::from_fn(require_user));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/users", post(auth::register))
        .route("/tokens/authentication", post(auth::create_token))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    public_routes
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(state.clone(), authenticate)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
