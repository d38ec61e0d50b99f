//! Request payload checks for insert endpoints.
//!
//! Required fields are checked by presence only: a field that exists and is
//! not `null` passes, whatever its value. Only after that does the body get
//! decoded into its typed shape, and a type mismatch is reported rather than
//! coerced.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::db::models::{NutritionLogPayload, UserWorkoutPayload};

#[derive(Debug, ThisError, PartialEq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// A client-supplied insert body and the fields it cannot do without.
pub trait Payload: DeserializeOwned {
    const REQUIRED: &'static [&'static str];
}

impl Payload for UserWorkoutPayload {
    const REQUIRED: &'static [&'static str] = &["date", "duration", "workoutId"];
}

impl Payload for NutritionLogPayload {
    const REQUIRED: &'static [&'static str] = &["date", "calories", "protein", "carbs", "fat"];
}

/// Names from `required` that are absent or `null` in `body`.
pub fn missing_fields(body: &Value, required: &[&'static str]) -> Result<Vec<&'static str>, ValidationError> {
    let object = body.as_object().ok_or(ValidationError::NotAnObject)?;
    Ok(required
        .iter()
        .copied()
        .filter(|field| object.get(*field).is_none_or(Value::is_null))
        .collect())
}

pub fn validate<T: Payload>(body: Value) -> Result<T, ValidationError> {
    let missing = missing_fields(&body, T::REQUIRED)?;
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    serde_json::from_value(body).map_err(|e| ValidationError::Malformed(e.to_string()))
}
