use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sid";

/// Caller identity established by [`require_auth`]. Handlers use it as the
/// owner of everything they read or write; a user id in the request body is
/// never trusted.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: String,
    pub sid: String,
}

/// Session id from the `sid` cookie, or from `Authorization: Bearer <sid>`.
pub fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            cookie
                .trim()
                .strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .filter(|sid| !sid.is_empty())
                .map(str::to_string)
        });

    from_cookie
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
        })
}

/// Rejects requests without a live session before they reach the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let sid = extract_session_id(req.headers()).ok_or(ApiError::Unauthorized)?;

    let user_id = state
        .storage
        .get_session_user(&sid)
        .await
        .map_err(state.failure("Failed to verify session"))?
        .ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(Identity { user_id, sid });
    Ok(next.run(req).await)
}
