//! The publish orchestrator.
//!
//! Sequences the transform stages over one raw capture: optimize, optional
//! audio merge, then an atomic relocate to the caller-requested output path.
//! Stages run strictly sequentially; each consumes the previous stage's
//! output artifact.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use starcast_media::{fs_utils, merge, optimize, probe, thumbnail};
use starcast_models::{MediaArtifact, PublishRequest};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::locate::find_latest_capture;
use crate::scratch::ScratchSpace;

/// Pipeline progress states. `Failed` is terminal and reachable from any
/// non-terminal state; the others advance strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Optimizing,
    MergingAudio,
    Publishing,
    Done,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineState::Idle => "idle",
            PipelineState::Optimizing => "optimizing",
            PipelineState::MergingAudio => "merging_audio",
            PipelineState::Publishing => "publishing",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Sequences transform stages over raw captures.
pub struct VideoPipeline {
    config: PipelineConfig,
}

impl VideoPipeline {
    /// Create a pipeline with explicit configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration this instance was constructed with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Handle to the most recent raw capture the recorder produced.
    pub fn latest_capture(&self) -> PipelineResult<MediaArtifact> {
        let path = find_latest_capture(&self.config.captures_dir)?;
        Ok(MediaArtifact::raw(path))
    }

    /// Run the full publish flow.
    ///
    /// On success the returned artifact exists exactly at the requested
    /// output path. On any stage failure every intermediate created by this
    /// run is deleted and the originating error propagates unchanged; no
    /// retries happen here, since a transcode is expensive and not safe to
    /// rerun blindly.
    pub async fn publish(&self, request: &PublishRequest) -> PipelineResult<MediaArtifact> {
        if !request.input.exists() {
            return Err(PipelineError::InputNotFound(request.input.clone()));
        }

        let raw = MediaArtifact::raw(&request.input);
        let scratch = ScratchSpace::create(&self.config.scratch_dir).await?;
        let run_id = scratch.run_id();

        info!(
            %run_id,
            input = %raw.path().display(),
            output = %request.output.display(),
            "Publish run started"
        );

        match self.run_stages(&raw, request, &scratch).await {
            Ok(published) => {
                if let Err(e) = scratch.cleanup().await {
                    warn!(%run_id, error = %e, "Scratch cleanup failed after publish");
                }
                info!(
                    %run_id,
                    state = %PipelineState::Done,
                    output = %published.path().display(),
                    "Publish run complete"
                );
                Ok(published)
            }
            Err(err) => {
                // Failed runs leave no intermediates behind
                if let Err(e) = scratch.cleanup().await {
                    warn!(%run_id, error = %e, "Scratch cleanup failed after error");
                }
                warn!(%run_id, state = %PipelineState::Failed, error = %err, "Publish run failed");
                Err(err)
            }
        }
    }

    async fn run_stages(
        &self,
        raw: &MediaArtifact,
        request: &PublishRequest,
        scratch: &ScratchSpace,
    ) -> PipelineResult<MediaArtifact> {
        let run_id = scratch.run_id();

        info!(%run_id, state = %PipelineState::Optimizing, "Optimizing capture");
        let optimized = scratch.stage_path("optimized", raw.path());
        optimize::optimize_video(raw.path(), &optimized, &self.config.encoding).await?;
        let mut working = MediaArtifact::intermediate(&optimized);

        if let Some(audio) = request.audio.as_deref() {
            if audio.exists() {
                info!(%run_id, state = %PipelineState::MergingAudio, audio = %audio.display(), "Merging audio");
                let merged = scratch.stage_path("merged", raw.path());
                // The merge consumes (and deletes) the optimize output
                merge::merge_audio(
                    working.path(),
                    audio,
                    &merged,
                    &self.config.merge_audio_bitrate,
                )
                .await?;
                working = MediaArtifact::intermediate(&merged);
            } else {
                warn!(%run_id, audio = %audio.display(), "Audio track missing, skipping merge");
            }
        }

        info!(%run_id, state = %PipelineState::Publishing, "Publishing");
        let info = probe::probe_video(working.path()).await?;
        info!(
            %run_id,
            duration_secs = info.duration,
            width = info.width,
            height = info.height,
            "Relocating final artifact"
        );

        fs_utils::move_file(working.path(), &request.output).await?;

        Ok(working.into_final(&request.output))
    }

    /// Extract a thumbnail using the configured width and timestamp.
    pub async fn thumbnail(
        &self,
        video: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> PipelineResult<()> {
        thumbnail::extract_thumbnail(
            video,
            output,
            self.config.thumbnail_timestamp,
            self.config.thumbnail_width,
        )
        .await?;
        Ok(())
    }
}
