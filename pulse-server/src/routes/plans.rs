use axum::Json;
use axum::extract::{Path, State};

use pulse::db::models::{WorkoutPlan, WorkoutPlanDetail};

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

pub async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    let plans = state
        .storage
        .get_workout_plans()
        .await
        .map_err(state.failure("Failed to fetch workout plans"))?;
    Ok(Json(plans))
}

pub async fn list_specialized(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    let plans = state
        .storage
        .get_specialized_workouts()
        .await
        .map_err(state.failure("Failed to fetch specialized workouts"))?;
    Ok(Json(plans))
}

/// The plan with its ordered exercises under `exercises`. Both reads come
/// from one snapshot; if either fails the whole request fails.
pub async fn get_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<WorkoutPlanDetail>, ApiError> {
    let detail = match parse_id(&raw_id, "workout plan")? {
        Some(id) => state
            .storage
            .get_workout_plan_detail(id)
            .await
            .map_err(state.failure("Failed to fetch workout plan"))?,
        None => None,
    }
    .ok_or_else(|| ApiError::not_found("Workout plan"))?;
    Ok(Json(detail))
}

pub async fn list_by_goal(
    State(state): State<AppState>,
    Path(goal): Path<String>,
) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    let plans = state
        .storage
        .get_workout_plans_by_goal(&goal)
        .await
        .map_err(state.failure("Failed to fetch workouts by goal"))?;
    Ok(Json(plans))
}
