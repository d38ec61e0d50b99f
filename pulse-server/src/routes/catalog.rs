use axum::Json;
use axum::extract::{Path, State};

use pulse::db::models::{EquipmentType, Exercise, ExerciseCategory};

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExerciseCategory>>, ApiError> {
    let categories = state
        .storage
        .get_exercise_categories()
        .await
        .map_err(state.failure("Failed to fetch exercise categories"))?;
    Ok(Json(categories))
}

pub async fn list_equipment(
    State(state): State<AppState>,
) -> Result<Json<Vec<EquipmentType>>, ApiError> {
    let equipment = state
        .storage
        .get_equipment_types()
        .await
        .map_err(state.failure("Failed to fetch equipment types"))?;
    Ok(Json(equipment))
}

pub async fn list_exercises(State(state): State<AppState>) -> Result<Json<Vec<Exercise>>, ApiError> {
    let exercises = state
        .storage
        .get_exercises()
        .await
        .map_err(state.failure("Failed to fetch exercises"))?;
    Ok(Json(exercises))
}

pub async fn get_exercise(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Exercise>, ApiError> {
    let exercise = match parse_id(&raw_id, "exercise")? {
        Some(id) => state
            .storage
            .get_exercise_by_id(id)
            .await
            .map_err(state.failure("Failed to fetch exercise"))?,
        None => None,
    }
    .ok_or_else(|| ApiError::not_found("Exercise"))?;
    Ok(Json(exercise))
}

pub async fn list_by_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let Some(category_id) = parse_id(&raw_id, "category")? else {
        return Ok(Json(Vec::new()));
    };
    let exercises = state
        .storage
        .get_exercises_by_category(category_id)
        .await
        .map_err(state.failure("Failed to fetch exercises by category"))?;
    Ok(Json(exercises))
}

pub async fn list_by_equipment(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let Some(equipment_id) = parse_id(&raw_id, "equipment")? else {
        return Ok(Json(Vec::new()));
    };
    let exercises = state
        .storage
        .get_exercises_by_equipment(equipment_id)
        .await
        .map_err(state.failure("Failed to fetch exercises by equipment"))?;
    Ok(Json(exercises))
}
