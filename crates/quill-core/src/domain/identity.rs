use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The verified caller of a request.
///
/// Derived from a token on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub id: Uuid,
    pub username: String,
}

impl CallerIdentity {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
