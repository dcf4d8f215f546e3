//! Delivery optimization stage.

use std::path::Path;

use tracing::info;

use starcast_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the optimize command (pure).
///
/// Re-encodes with the configured quality/codec profile; `+faststart`
/// keeps the result streaming-ready.
pub fn optimize_command(input: &Path, output: &Path, encoding: &EncodingConfig) -> FfmpegCommand {
    FfmpegCommand::new(input, output).output_args(encoding.to_ffmpeg_args())
}

/// Re-encode a capture with the wide-compatibility delivery profile.
pub async fn optimize_video(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    encoding: &EncodingConfig,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    info!(
        input = %input.display(),
        output = %output.display(),
        codec = %encoding.codec,
        crf = encoding.crf,
        "Optimizing capture"
    );

    FfmpegRunner::new()
        .run(&optimize_command(input, output, encoding))
        .await
}
