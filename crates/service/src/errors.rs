use models::{EntityId, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("voter {0} does not exist")]
    VoterNotFound(EntityId),
    #[error("poll {0} does not exist")]
    PollNotFound(EntityId),
    #[error("bulk delete removed {removed} of {matched} matched keys")]
    PartialFailure { matched: u64, removed: u64 },
    #[error("cache backend unavailable: {0}")]
    Backend(String),
    #[error("corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(label: &str, id: EntityId) -> Self {
        Self::NotFound(format!("{} {} not found", label, id))
    }

    pub fn already_exists(label: &str, id: EntityId) -> Self {
        Self::AlreadyExists(format!("{} {} already exists", label, id))
    }

    pub fn backend(e: impl std::fmt::Display) -> Self {
        Self::Backend(e.to_string())
    }

    /// Input the caller could fix: bad shape or a broken invariant in the payload.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Model(ModelError::Validation(_)))
    }
}
