//! FFprobe inspection.

use std::path::Path;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Video file information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
    /// Video codec
    pub codec: String,
    /// File size in bytes
    pub size: u64,
    /// Bitrate in bits/second
    pub bitrate: u64,
}

/// Stream kinds used for merge precondition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    fn codec_type(self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
        }
    }
}

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    size: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
}

/// Probe a file's duration in seconds.
///
/// Uses the single-value output form, parsed strictly: a corrupted or empty
/// file yields `ProbeFailed`, never `0.0`. Duration is never cached; any
/// stage that derives timing parameters probes immediately beforehand.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::probe_failed(
            format!("FFprobe failed on {}", path.display()),
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_duration_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the single-value duration output.
fn parse_duration_output(raw: &str) -> MediaResult<f64> {
    let trimmed = raw.trim();
    let duration: f64 = trimmed.parse().map_err(|_| {
        MediaError::probe_failed(format!("unparseable duration {trimmed:?}"), None)
    })?;

    if !duration.is_finite() || duration <= 0.0 {
        return Err(MediaError::probe_failed(
            format!("duration {duration} is not positive"),
            None,
        ));
    }

    Ok(duration)
}

/// Probe a video file for full format and stream information.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoInfo> {
    let path = path.as_ref();
    let probe = ffprobe_json(path).await?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| {
            MediaError::probe_failed(format!("no video stream in {}", path.display()), None)
        })?;

    let duration = probe
        .format
        .duration
        .as_deref()
        .map(parse_duration_output)
        .transpose()?
        .ok_or_else(|| {
            MediaError::probe_failed(format!("no duration reported for {}", path.display()), None)
        })?;

    let size = probe
        .format
        .size
        .as_ref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let bitrate = probe
        .format
        .bit_rate
        .as_ref()
        .and_then(|b| b.parse::<u64>().ok())
        .unwrap_or(0);

    let fps = video_stream
        .avg_frame_rate
        .as_ref()
        .or(video_stream.r_frame_rate.as_ref())
        .and_then(|r| parse_frame_rate(r))
        .unwrap_or(30.0);

    Ok(VideoInfo {
        duration,
        width: video_stream.width.unwrap_or(0),
        height: video_stream.height.unwrap_or(0),
        fps,
        codec: video_stream.codec_name.clone().unwrap_or_default(),
        size,
        bitrate,
    })
}

/// Whether the file carries at least one stream of the given kind.
pub async fn has_stream(path: impl AsRef<Path>, kind: StreamKind) -> MediaResult<bool> {
    let probe = ffprobe_json(path.as_ref()).await?;
    Ok(probe
        .streams
        .iter()
        .any(|s| s.codec_type == kind.codec_type()))
}

/// Run the JSON probe.
async fn ffprobe_json(path: &Path) -> MediaResult<FfprobeOutput> {
    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::probe_failed(
            format!("FFprobe failed on {}", path.display()),
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Parse frame rate string (e.g., "30/1" or "29.97").
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("29.97").unwrap() - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_duration_strictness() {
        assert!((parse_duration_output("245.04\n").unwrap() - 245.04).abs() < 0.001);
        // Zero, negative, or garbage never become a silent 0.0
        assert!(matches!(
            parse_duration_output("0.0"),
            Err(MediaError::ProbeFailed { .. })
        ));
        assert!(matches!(
            parse_duration_output("-3.5"),
            Err(MediaError::ProbeFailed { .. })
        ));
        assert!(matches!(
            parse_duration_output("N/A"),
            Err(MediaError::ProbeFailed { .. })
        ));
        assert!(matches!(
            parse_duration_output(""),
            Err(MediaError::ProbeFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_probe_missing_file() {
        let err = probe_duration("/nonexistent/capture.mp4").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
