// Failures of the resource and prompt directories

use crate::protocol::JsonRpcError;
use meal_planner_client::MealPlannerError;

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Resource {0} not found")]
    UnknownResource(String),

    #[error("Prompt {0} not found")]
    UnknownPrompt(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error(transparent)]
    Backend(#[from] MealPlannerError),

    #[error("failed to encode payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::UnknownResource(_) | Self::UnknownPrompt(_) => true,
            Self::Backend(e) => e.is_not_found(),
            _ => false,
        }
    }

    pub fn to_jsonrpc(&self) -> JsonRpcError {
        if self.is_not_found() {
            JsonRpcError::not_found(self.to_string())
        } else if let Self::MissingArgument(_) = self {
            JsonRpcError::invalid_params(self.to_string())
        } else {
            JsonRpcError::internal_error(self.to_string())
        }
    }
}
