//! Publish request model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A unit of pipeline work: one raw capture, an optional audio track, and
/// the destination the published file must appear at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Raw capture to process.
    pub input: PathBuf,

    /// Optional audio track, merged after optimization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<PathBuf>,

    /// Caller-requested output path. Only the final relocate step writes here.
    pub output: PathBuf,
}

impl PublishRequest {
    /// Create a request without an audio track.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            audio: None,
            output: output.into(),
        }
    }

    /// Attach an audio track.
    pub fn with_audio(mut self, audio: impl Into<PathBuf>) -> Self {
        self.audio = Some(audio.into());
        self
    }
}
