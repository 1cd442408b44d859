//! Error types for track operations
//!
//! Every error here describes a rejected operation that left the track
//! untouched. Callers that only care about the published state can drop them.

use audiotrack_core::{AudioItemId, CoreError};
use thiserror::Error;

/// Track errors
#[derive(Debug, Error)]
pub enum TrackError {
    /// Source already queued and duplicates are not allowed
    #[error("Duplicate audio rejected: {0}")]
    Duplicate(String),

    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds {
        /// Requested index
        index: i64,
        /// Queue length at the time of the call
        len: usize,
    },

    /// No queued source matched a skip pattern
    #[error("No queued audio matches: {0}")]
    NoMatch(String),

    /// Item id not present in the queue
    #[error("Audio item not found: {0}")]
    ItemNotFound(AudioItemId),

    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Core / device layer error
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<config::ConfigError> for TrackError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for track operations
pub type Result<T> = std::result::Result<T, TrackError>;
