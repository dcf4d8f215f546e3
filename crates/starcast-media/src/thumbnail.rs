//! Thumbnail extraction.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::filters::filter_thumbnail;

/// Build the extraction command (pure).
pub fn thumbnail_command(
    video: &Path,
    output: &Path,
    timestamp: f64,
    scale_width: u32,
) -> FfmpegCommand {
    FfmpegCommand::new(video, output)
        .seek(timestamp)
        .single_frame()
        .video_filter(filter_thumbnail(scale_width))
}

/// Extract a single still frame at `timestamp` seconds (0.0 = first frame).
pub async fn extract_thumbnail(
    video: impl AsRef<Path>,
    output: impl AsRef<Path>,
    timestamp: f64,
    scale_width: u32,
) -> MediaResult<()> {
    FfmpegRunner::new()
        .run(&thumbnail_command(
            video.as_ref(),
            output.as_ref(),
            timestamp,
            scale_width,
        ))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_command() {
        let cmd = thumbnail_command(Path::new("final.mp4"), Path::new("final.jpg"), 0.0, 480);
        let args = cmd.build_args();

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], "0.000");
        let frames = args.iter().position(|a| a == "-vframes").unwrap();
        assert_eq!(args[frames + 1], "1");
        assert!(args.contains(&"scale=480:-2".to_string()));
    }
}
