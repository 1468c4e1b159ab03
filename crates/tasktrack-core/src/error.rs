use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid task id '{0}': expected a positive integer")]
    InvalidTaskId(String),

    #[error("unknown status '{0}' (expected active, done or inactive)")]
    InvalidStatus(String),

    #[error("invalid id pool entry: {0}")]
    InvalidPoolEntry(String),

    #[error("task description cannot be empty")]
    EmptyDescription,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
