use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Admission Errors
    #[error("Rate limit exceeded for {key}: retry after {retry_after_secs}s")]
    RateLimited {
        key: String,
        retry_after_secs: u64,
    },

    #[error("Too many failed login attempts: retry after {retry_after_secs}s")]
    TooManyAttempts {
        retry_after_secs: u64,
    },

    // Scheduling Errors
    #[error("Task has no identifier")]
    MissingTaskId,

    #[error("Invalid page: {page} (pages start at 1)")]
    InvalidPage { page: usize },

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Seconds a throttled caller should wait, for a `Retry-After` header.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Error::RateLimited { retry_after_secs, .. } => Some(*retry_after_secs),
            Error::TooManyAttempts { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
