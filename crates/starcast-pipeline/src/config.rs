//! Pipeline configuration.

use std::path::PathBuf;

use starcast_models::encoding::{THUMBNAIL_SCALE_WIDTH, THUMBNAIL_TIMESTAMP};
use starcast_models::EncodingConfig;

/// Configuration for a pipeline instance.
///
/// Passed explicitly at construction; concurrent pipeline instances never
/// share mutable configuration state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for per-run scratch space.
    pub scratch_dir: PathBuf,
    /// Directory the upstream recorder writes raw captures into.
    pub captures_dir: PathBuf,
    /// Encoding profile for the optimize stage.
    pub encoding: EncodingConfig,
    /// Audio bitrate for the merge stage.
    pub merge_audio_bitrate: String,
    /// Thumbnail scale width in pixels.
    pub thumbnail_width: u32,
    /// Thumbnail timestamp in seconds (0.0 = first frame).
    pub thumbnail_timestamp: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("/tmp/starcast"),
            captures_dir: PathBuf::from("captures"),
            encoding: EncodingConfig::default(),
            merge_audio_bitrate: "192k".to_string(),
            thumbnail_width: THUMBNAIL_SCALE_WIDTH,
            thumbnail_timestamp: THUMBNAIL_TIMESTAMP,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut encoding = EncodingConfig::default();

        if let Some(crf) = std::env::var("STARCAST_CRF").ok().and_then(|s| s.parse().ok()) {
            encoding.crf = crf;
        }
        if let Ok(preset) = std::env::var("STARCAST_PRESET") {
            encoding.preset = preset;
        }

        Self {
            scratch_dir: std::env::var("STARCAST_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.scratch_dir),
            captures_dir: std::env::var("STARCAST_CAPTURES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.captures_dir),
            encoding,
            merge_audio_bitrate: std::env::var("STARCAST_AUDIO_BITRATE")
                .unwrap_or(defaults.merge_audio_bitrate),
            thumbnail_width: std::env::var("STARCAST_THUMBNAIL_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.thumbnail_width),
            thumbnail_timestamp: std::env::var("STARCAST_THUMBNAIL_TIMESTAMP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.thumbnail_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.merge_audio_bitrate, "192k");
        assert_eq!(config.thumbnail_width, 480);
        assert_eq!(config.encoding.crf, 18);
        assert!((config.thumbnail_timestamp).abs() < f64::EPSILON);
    }
}
