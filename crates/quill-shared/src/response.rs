//! Standardized API error body.

use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint that has one: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new("Forbidden")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}
