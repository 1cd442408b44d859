/// Core error types for audiotrack
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for audiotrack
#[derive(Error, Debug)]
pub enum CoreError {
    /// Device-level audio errors (an item could not be created or controlled)
    #[error("Audio error: {0}")]
    Audio(String),

    /// Unsupported or malformed source locator
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create an audio error
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Create an invalid source error
    pub fn invalid_source(src: impl Into<String>) -> Self {
        Self::InvalidSource(src.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
