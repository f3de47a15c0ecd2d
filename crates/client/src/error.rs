//! Error types for the meal planner backend client.

use meal_planner_core::{EntityKind, SchemaValidationError};

/// Result type for client operations.
pub type MealPlannerResult<T> = Result<T, MealPlannerError>;

/// Errors that can occur while talking to the backend store.
#[derive(Debug, thiserror::Error)]
pub enum MealPlannerError {
    /// The requested entity does not exist.
    #[error("{kind} with id {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// An add targeted an id that is already stored.
    #[error("{kind} with id {id} already exists")]
    DuplicateId { kind: EntityKind, id: String },

    /// The backend answered with a payload that does not match the domain schema.
    #[error("backend returned an invalid {kind}: {source}")]
    BackendValidation {
        kind: EntityKind,
        #[source]
        source: SchemaValidationError,
    },

    /// The backend could not be reached.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] reqwest::Error),

    /// The backend answered with an unexpected status.
    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered with a body that is not JSON.
    #[error("backend returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MealPlannerError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    /// Check whether this error means the requested entity is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            "empty response".to_string()
        } else {
            body.to_string()
        };
        Self::Api { status, message }
    }
}
