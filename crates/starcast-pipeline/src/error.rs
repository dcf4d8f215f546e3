//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

use starcast_media::MediaError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced by the publish orchestrator.
///
/// Stage failures pass through as [`PipelineError::Media`] unchanged, with
/// the external tool's captured diagnostics intact; the pipeline never
/// retries and never rewraps the originating error.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
