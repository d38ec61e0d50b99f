use std::fmt::Display;
use std::sync::Arc;

use pulse::Storage;

use crate::config::Settings;
use crate::error::ApiError;

/// Shared application state, injected into all route handlers via axum state.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, settings: Settings) -> Self {
        Self { storage, settings }
    }

    /// Error mapper for storage calls: logs the cause and answers 500 with
    /// `message`.
    pub fn failure<E: Display>(&self, message: &'static str) -> impl FnOnce(E) -> ApiError + use<E> {
        let expose = self.settings.is_development();
        move |cause| ApiError::internal(message, cause, expose)
    }
}
