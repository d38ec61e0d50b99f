use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Serialize;
use std::fmt::Display;

use pulse::validation::ValidationError;

/// Every way a handler can fail. The body is always `{"message": ...}`,
/// with `fields` or `error` added where they help the client.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    MissingFields(Vec<&'static str>),
    InvalidBody(String),
    Unauthorized,
    NotFound(String),
    Internal {
        message: &'static str,
        detail: Option<String>,
    },
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ErrorBody {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: None,
            error: None,
        }
    }
}

impl ApiError {
    pub fn invalid_id(entity: &str) -> Self {
        ApiError::BadRequest(format!("Invalid {} ID", entity))
    }

    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{} not found", entity))
    }

    /// Logs the full cause; the client only sees `message`, plus the cause
    /// itself when `expose` is set (development mode).
    pub fn internal<E: Display>(message: &'static str, cause: E, expose: bool) -> Self {
        error!("{}: {}", message, cause);
        ApiError::Internal {
            message,
            detail: expose.then(|| cause.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::MissingFields(_) | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => ErrorBody::message(msg),
            ApiError::MissingFields(fields) => ErrorBody {
                fields: Some(fields),
                ..ErrorBody::message("Missing required fields")
            },
            ApiError::InvalidBody(detail) => ErrorBody {
                error: Some(detail),
                ..ErrorBody::message("Invalid request body")
            },
            ApiError::Unauthorized => ErrorBody::message("Unauthorized"),
            ApiError::Internal { message, detail } => ErrorBody {
                error: detail,
                ..ErrorBody::message(message)
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::MissingFields(fields) => ApiError::MissingFields(fields),
            other => ApiError::InvalidBody(other.to_string()),
        }
    }
}

/// Parses an integer path segment: an optional `-` followed by ASCII digits,
/// nothing else. A well-formed id outside the `i32` range cannot name a
/// stored row and comes back as `None`.
pub fn parse_id(raw: &str, entity: &str) -> Result<Option<i32>, ApiError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::invalid_id(entity));
    }
    Ok(raw.parse::<i32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_is_strict() {
        assert_eq!(parse_id("42", "exercise").unwrap(), Some(42));
        assert_eq!(parse_id("-3", "exercise").unwrap(), Some(-3));
        for raw in ["abc", "12abc", "1.5", "", " 7", "+5", "-", "--1", "1e3"] {
            match parse_id(raw, "exercise") {
                Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Invalid exercise ID"),
                other => panic!("{:?} parsed as {:?}", raw, other),
            }
        }
    }

    #[test]
    fn out_of_range_ids_are_absent_not_invalid() {
        assert_eq!(parse_id("2147483647", "exercise").unwrap(), Some(i32::MAX));
        assert_eq!(parse_id("2147483648", "exercise").unwrap(), None);
        assert_eq!(parse_id("99999999999999999999999", "exercise").unwrap(), None);
    }

    #[test]
    fn internal_hides_detail_unless_exposed() {
        match ApiError::internal("Failed to fetch exercises", "disk on fire", false) {
            ApiError::Internal { detail, .. } => assert_eq!(detail, None),
            other => panic!("unexpected {:?}", other),
        }
        match ApiError::internal("Failed to fetch exercises", "disk on fire", true) {
            ApiError::Internal { detail, .. } => assert_eq!(detail.as_deref(), Some("disk on fire")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
