//! Video encoding configuration.

use serde::{Deserialize, Serialize};

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "slow";
/// Default CRF (Constant Rate Factor); favors visual fidelity over file size
pub const DEFAULT_CRF: u8 = 18;
/// Default audio bitrate
pub const DEFAULT_AUDIO_BITRATE: &str = "192k";
/// H.264 profile for wide device compatibility
pub const DEFAULT_PROFILE: &str = "high";
/// H.264 level for wide device compatibility
pub const DEFAULT_LEVEL: &str = "4.1";

/// Thumbnail generation settings
pub const THUMBNAIL_SCALE_WIDTH: u32 = 480;
/// Default thumbnail timestamp (first frame)
pub const THUMBNAIL_TIMESTAMP: f64 = 0.0;

/// Video encoding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Video codec (e.g., "libx264", "h264_nvenc")
    #[serde(default = "default_video_codec")]
    pub codec: String,

    /// Encoding preset (e.g., "fast", "medium", "slow")
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Constant Rate Factor (quality, 0-51, lower is better)
    #[serde(default = "default_crf")]
    pub crf: u8,

    /// Audio codec
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,

    /// Audio bitrate
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,

    /// H.264 profile
    #[serde(default = "default_profile")]
    pub profile: String,

    /// H.264 level
    #[serde(default = "default_level")]
    pub level: String,

    /// Relocate the moov atom for streaming playback (`-movflags +faststart`)
    #[serde(default = "default_faststart")]
    pub faststart: bool,

    /// Use hardware acceleration (NVENC)
    #[serde(default)]
    pub use_nvenc: bool,

    /// Additional FFmpeg output arguments
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_video_codec() -> String {
    DEFAULT_VIDEO_CODEC.to_string()
}
fn default_preset() -> String {
    DEFAULT_PRESET.to_string()
}
fn default_crf() -> u8 {
    DEFAULT_CRF
}
fn default_audio_codec() -> String {
    DEFAULT_AUDIO_CODEC.to_string()
}
fn default_audio_bitrate() -> String {
    DEFAULT_AUDIO_BITRATE.to_string()
}
fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}
fn default_level() -> String {
    DEFAULT_LEVEL.to_string()
}
fn default_faststart() -> bool {
    true
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            faststart: true,
            use_nvenc: false,
            extra_args: Vec::new(),
        }
    }
}

impl EncodingConfig {
    /// Create a new encoding configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new config with updated CRF.
    pub fn with_crf(mut self, crf: u8) -> Self {
        self.crf = crf;
        self
    }

    /// Returns a new config with updated preset.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    /// Enable NVENC hardware acceleration.
    pub fn with_nvenc(mut self) -> Self {
        self.use_nvenc = true;
        self.codec = "h264_nvenc".to_string();
        self
    }

    /// Convert to FFmpeg command arguments.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        let mut args = vec![
            "-c:v".to_string(),
            self.codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
        ];

        // CRF is not used with NVENC, use -cq instead
        if self.use_nvenc {
            args.extend_from_slice(&["-cq".to_string(), self.crf.to_string()]);
        } else {
            args.extend_from_slice(&["-crf".to_string(), self.crf.to_string()]);
            args.extend_from_slice(&[
                "-profile:v".to_string(),
                self.profile.clone(),
                "-level".to_string(),
                self.level.clone(),
            ]);
        }

        if self.faststart {
            args.extend_from_slice(&["-movflags".to_string(), "+faststart".to_string()]);
        }

        args.extend_from_slice(&[
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]);

        args.extend(self.extra_args.clone());

        args
    }
}
