use axum::Json;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::auth::require_auth;
use crate::error::ApiError;
use crate::state::AppState;

pub mod catalog;
pub mod dev;
pub mod plans;
pub mod user;

/// Everything mounted under `/api`.
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/exercise-categories", get(catalog::list_categories))
        .route("/equipment-types", get(catalog::list_equipment))
        .route("/exercises", get(catalog::list_exercises))
        .route("/exercises/{id}", get(catalog::get_exercise))
        .route(
            "/exercises/category/{category_id}",
            get(catalog::list_by_category),
        )
        .route(
            "/exercises/equipment/{equipment_id}",
            get(catalog::list_by_equipment),
        )
        .route("/workout-plans", get(plans::list_plans))
        .route("/workout-plans/specialized", get(plans::list_specialized))
        .route("/workout-plans/{id}", get(plans::get_plan))
        .route("/workout-plans/goal/{goal}", get(plans::list_by_goal));

    let protected = Router::new()
        .route("/auth/user", get(user::current_user))
        .route("/auth/logout", post(user::logout))
        .route(
            "/user/workouts",
            get(user::list_workouts).post(user::add_workout),
        )
        .route(
            "/user/nutrition",
            get(user::list_nutrition).post(user::add_nutrition),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let mut api = public.merge(protected);
    if state.settings.dev_endpoints_enabled() {
        api = api.route("/test-auth", get(dev::test_auth));
    }

    api.fallback(api_not_found)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
