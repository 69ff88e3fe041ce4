//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Vision services
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VisionError {
    /// A raw segment carried neither a start nor a finish timestamp.
    #[error("Invalid segment: {0}")]
    InvalidSegment(String),

    /// A resolved country named a timezone the tz database does not know.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Vision operations
pub type Result<T> = std::result::Result<T, VisionError>;
