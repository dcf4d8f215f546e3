//! Audio/video merge stage.

use std::path::Path;

use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::probe::{has_stream, StreamKind};

/// Build the merge command (pure).
///
/// Video stream is copied bit-for-bit, audio is re-encoded to AAC at the
/// given bitrate, and `-shortest` truncates to the shorter input rather
/// than padding with silence or black frames.
pub fn merge_command(video: &Path, audio: &Path, output: &Path, audio_bitrate: &str) -> FfmpegCommand {
    FfmpegCommand::new(video, output)
        .add_input(audio)
        .video_codec("copy")
        .audio_codec("aac")
        .audio_bitrate(audio_bitrate)
        .map("0:v:0")
        .map("1:a:0")
        .output_arg("-shortest")
}

/// Merge an audio track into a video.
///
/// The video input is consumed: it is deleted once the merged output
/// exists. This is explicit stage cleanup, not a rename side effect; the
/// caller keeps ownership of the audio track.
pub async fn merge_audio(
    video: impl AsRef<Path>,
    audio: impl AsRef<Path>,
    output: impl AsRef<Path>,
    audio_bitrate: &str,
) -> MediaResult<()> {
    let video = video.as_ref();
    let audio = audio.as_ref();
    let output = output.as_ref();

    if !has_stream(video, StreamKind::Video).await? {
        return Err(MediaError::input_mismatch(format!(
            "no video stream in {}",
            video.display()
        )));
    }
    if !has_stream(audio, StreamKind::Audio).await? {
        return Err(MediaError::input_mismatch(format!(
            "no audio stream in {}",
            audio.display()
        )));
    }

    info!(
        video = %video.display(),
        audio = %audio.display(),
        output = %output.display(),
        "Merging audio track"
    );

    FfmpegRunner::new()
        .run(&merge_command(video, audio, output, audio_bitrate))
        .await?;

    // The video input is consumed by this stage
    tokio::fs::remove_file(video).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_command_mapping() {
        let cmd = merge_command(
            Path::new("optimized.mp4"),
            Path::new("ambient.m4a"),
            Path::new("merged.mp4"),
            "192k",
        );
        let args = cmd.build_args();

        assert_eq!(args.iter().filter(|a| *a == "-i").count(), 2);
        assert!(args.contains(&"0:v:0".to_string()));
        assert!(args.contains(&"1:a:0".to_string()));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"192k".to_string()));

        // Video is copied, audio re-encoded
        let cv = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[cv + 1], "copy");
        let ca = args.iter().position(|a| a == "-c:a").unwrap();
        assert_eq!(args[ca + 1], "aac");
    }

    #[tokio::test]
    async fn test_merge_missing_video_input() {
        let err = merge_audio("/nonexistent/v.mp4", "/nonexistent/a.m4a", "/tmp/m.mp4", "192k")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
