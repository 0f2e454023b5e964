use thiserror::Error;

/// Errors returned by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
