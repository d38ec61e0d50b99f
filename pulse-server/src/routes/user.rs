use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::Json;
use serde_json::Value;

use pulse::db::models::{NutritionLog, NutritionLogPayload, User, UserWorkout, UserWorkoutPayload};
use pulse::validation::{Payload, validate};

use crate::auth::{Identity, SESSION_COOKIE};
use crate::error::ApiError;
use crate::state::AppState;

/// Required-field check, then typed decode. Runs before storage is touched.
fn decode<T: Payload>(body: Result<Json<Value>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    Ok(validate::<T>(value)?)
}

/// The session's user, or `null` when the row is gone.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Option<User>>, ApiError> {
    let user = state
        .storage
        .get_user(&identity.user_id)
        .await
        .map_err(state.failure("Failed to fetch user"))?;
    Ok(Json(user))
}

/// Ends the current session and clears the cookie.
pub async fn logout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    state
        .storage
        .delete_session(&identity.sid)
        .await
        .map_err(state.failure("Failed to log out"))?;

    let mut headers = HeaderMap::new();
    let expired = format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", SESSION_COOKIE);
    if let Ok(value) = HeaderValue::from_str(&expired) {
        headers.insert(header::SET_COOKIE, value);
    }
    Ok((StatusCode::NO_CONTENT, headers))
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<UserWorkout>>, ApiError> {
    let workouts = state
        .storage
        .get_user_workouts(&identity.user_id)
        .await
        .map_err(state.failure("Failed to fetch user workouts"))?;
    Ok(Json(workouts))
}

pub async fn add_workout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UserWorkout>), ApiError> {
    let payload = decode::<UserWorkoutPayload>(body)?;
    let workout = state
        .storage
        .add_user_workout(payload.into_new(identity.user_id))
        .await
        .map_err(state.failure("Failed to add user workout"))?;
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn list_nutrition(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<NutritionLog>>, ApiError> {
    let logs = state
        .storage
        .get_user_nutrition_logs(&identity.user_id)
        .await
        .map_err(state.failure("Failed to fetch nutrition logs"))?;
    Ok(Json(logs))
}

pub async fn add_nutrition(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<NutritionLog>), ApiError> {
    let payload = decode::<NutritionLogPayload>(body)?;
    let log = state
        .storage
        .add_nutrition_log(payload.into_new(identity.user_id))
        .await
        .map_err(state.failure("Failed to add nutrition log"))?;
    Ok((StatusCode::CREATED, Json(log)))
}
