//! Loop extension stages.
//!
//! Two ways to stretch a capture to a target duration:
//! - [`loop_to_duration`]: hard cuts via an ordered concat manifest.
//! - [`crossfade_loop`]: a seamless repeat that dissolves the tail of the
//!   clip into its own head.
//!
//! Both derive the repeat count the same way and rely on a hard `-t` trim
//! for the exact target.

use std::path::Path;

use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::build_crossfade_filter;
use crate::probe::probe_duration;

/// Total number of plays needed to cover `target` seconds of `source`
/// material: `floor(target / source) + 1`.
///
/// Intentional overshoot; the trailing `-t` trim cuts back to the exact
/// target. `-stream_loop` callers pass `repeats - 1` since that flag counts
/// additional plays.
pub fn repeats_for_target(target: f64, source: f64) -> MediaResult<u64> {
    if !source.is_finite() || source <= 0.0 {
        return Err(MediaError::invalid_duration(format!(
            "source duration {source}s must be positive"
        )));
    }
    if !target.is_finite() || target <= 0.0 {
        return Err(MediaError::invalid_duration(format!(
            "target duration {target}s must be positive"
        )));
    }

    Ok((target / source).floor() as u64 + 1)
}

/// Validate crossfade parameters against the probed source duration.
///
/// The dissolve needs head and tail segments that both fit inside the
/// source, so the fade must be strictly shorter than the clip.
pub fn validate_fade(fade_duration: f64, source_duration: f64) -> MediaResult<()> {
    if !fade_duration.is_finite() || fade_duration <= 0.0 {
        return Err(MediaError::invalid_duration(format!(
            "fade duration {fade_duration}s must be positive"
        )));
    }
    if fade_duration >= source_duration {
        return Err(MediaError::invalid_duration(format!(
            "fade duration {fade_duration}s must be shorter than the source ({source_duration}s)"
        )));
    }
    Ok(())
}

/// Build the concat manifest body (pure): one `file` entry per play.
pub fn concat_manifest(source: &Path, repeats: u64) -> String {
    let mut body = String::new();
    for _ in 0..repeats {
        body.push_str(&format!("file '{}'\n", source.display()));
    }
    body
}

/// Build the concat command (pure): manifest input, stream copy, hard trim.
pub fn loop_command(manifest: &Path, output: &Path, target: f64) -> FfmpegCommand {
    FfmpegCommand::new(manifest, output)
        .input_args(["-f", "concat", "-safe", "0"])
        .codec_copy()
        .trim_to(target)
}

/// Build the crossfade loop command (pure).
///
/// The physical source is stream-looped so the filter graph has enough raw
/// material, then trimmed to the target.
pub fn crossfade_command(
    input: &Path,
    output: &Path,
    target: f64,
    source_duration: f64,
    fade_duration: f64,
    repeats: u64,
) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .stream_loop(repeats.saturating_sub(1))
        .filter_complex(build_crossfade_filter(source_duration, fade_duration))
        .map("[out]")
        .trim_to(target)
}

/// Repeat a capture until it covers `target` seconds, trimming the overshoot.
pub async fn loop_to_duration(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    // Fresh probe: the repeat count depends on the current duration
    let source = probe_duration(input).await?;
    let repeats = repeats_for_target(target, source)?;

    info!(
        input = %input.display(),
        repeats,
        target_secs = target,
        "Looping capture"
    );

    // Manifest entries must be absolute; the manifest sits next to the
    // output so concurrent runs cannot collide
    let absolute = tokio::fs::canonicalize(input).await?;
    let manifest_path = output.with_extension("concat.txt");
    tokio::fs::write(&manifest_path, concat_manifest(&absolute, repeats)).await?;

    let result = FfmpegRunner::new()
        .run(&loop_command(&manifest_path, output, target))
        .await;

    // Manifest is removed regardless of outcome
    let _ = tokio::fs::remove_file(&manifest_path).await;

    result
}

/// Render a seamless loop: crossfade the tail into the head, then repeat
/// until `target` seconds.
pub async fn crossfade_loop(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    target: f64,
    fade_duration: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source = probe_duration(input).await?;
    validate_fade(fade_duration, source)?;
    let repeats = repeats_for_target(target, source)?;

    info!(
        input = %input.display(),
        fade_secs = fade_duration,
        target_secs = target,
        "Rendering seamless loop"
    );

    FfmpegRunner::new()
        .run(&crossfade_command(
            input,
            output,
            target,
            source,
            fade_duration,
            repeats,
        ))
        .await
}
