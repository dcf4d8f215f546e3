//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while driving the external media tools.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Stage failed: {message}")]
    StageFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("Probe failed: {message}")]
    ProbeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("Input mismatch: {0}")]
    InputMismatch(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl MediaError {
    /// Create a stage failure error.
    pub fn stage_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::StageFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a probe failure error.
    pub fn probe_failed(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ProbeFailed {
            message: message.into(),
            stderr,
        }
    }

    /// Create an input mismatch error.
    pub fn input_mismatch(message: impl Into<String>) -> Self {
        Self::InputMismatch(message.into())
    }

    /// Create an invalid duration error.
    pub fn invalid_duration(message: impl Into<String>) -> Self {
        Self::InvalidDuration(message.into())
    }
}
