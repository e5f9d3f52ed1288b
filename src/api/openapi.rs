use crate::api::handlers::{auth, health, workouts};
use crate::types::{
    CreateWorkoutRequest, HealthResponse, RegisterRequest, TokenRequest, TokenResponse,
    UpdateWorkoutRequest, UserResponse, Workout, WorkoutEntry,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI document served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "FitTrack API", description = "Personal workout tracking"),
    paths(
        health::health_check,
        auth::register,
        auth::create_token,
        workouts::get_workout,
        workouts::create_workout,
        workouts::update_workout,
        workouts::delete_workout,
    ),
    components(schemas(
        RegisterRequest,
        UserResponse,
        TokenRequest,
        TokenResponse,
        Workout,
        WorkoutEntry,
        CreateWorkoutRequest,
        UpdateWorkoutRequest,
        HealthResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration and token issuance"),
        (name = "workouts", description = "Workout CRUD"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("should serialize");

        let paths = json["paths"].as_object().expect("paths object");
        for path in ["/health", "/users", "/tokens/authentication", "/workouts", "/workouts/{id}"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(json["components"]["securitySchemes"]["bearer"].is_object());
    }
}
