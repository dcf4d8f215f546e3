//! Publish flow integration tests.
//!
//! These exercise the orchestration and cleanup discipline without
//! depending on the external tool succeeding: an unreadable input makes
//! the optimize stage fail whether or not FFmpeg is installed, and the
//! cleanup invariant must hold either way.

use tempfile::TempDir;

use starcast_models::PublishRequest;
use starcast_pipeline::{PipelineConfig, PipelineError, VideoPipeline};

fn pipeline_with_scratch(scratch_root: &std::path::Path) -> VideoPipeline {
    let config = PipelineConfig {
        scratch_dir: scratch_root.to_path_buf(),
        ..PipelineConfig::default()
    };
    VideoPipeline::new(config)
}

#[tokio::test]
async fn missing_input_fails_without_touching_scratch() {
    let scratch = TempDir::new().unwrap();
    let pipeline = pipeline_with_scratch(scratch.path());

    let request = PublishRequest::new("/nonexistent/raw.mp4", "/tmp/final.mp4");
    let err = pipeline.publish(&request).await.unwrap_err();

    assert!(matches!(err, PipelineError::InputNotFound(_)));
    // No run directory was created: the input check precedes everything
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn failed_run_leaves_no_intermediates() {
    let scratch = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let pipeline = pipeline_with_scratch(scratch.path());

    // A capture FFmpeg cannot decode; the optimize stage must fail
    let raw = work.path().join("raw.mp4");
    std::fs::write(&raw, b"not a video").unwrap();
    let output = work.path().join("final.mp4");

    let result = pipeline.publish(&PublishRequest::new(&raw, &output)).await;

    assert!(result.is_err());
    assert!(!output.exists(), "nothing may be written to the output path");
    assert!(raw.exists(), "the raw input is never consumed");
    assert_eq!(
        std::fs::read_dir(scratch.path()).unwrap().count(),
        0,
        "failed runs must remove their scratch directory"
    );
}

#[tokio::test]
async fn concurrent_runs_use_disjoint_scratch() {
    let scratch = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let pipeline = pipeline_with_scratch(scratch.path());

    let raw = work.path().join("raw.mp4");
    std::fs::write(&raw, b"not a video").unwrap();

    // Same raw input, two outputs; both fail at the optimize stage, and
    // neither may observe the other's intermediates
    let req_a = PublishRequest::new(&raw, work.path().join("a.mp4"));
    let req_b = PublishRequest::new(&raw, work.path().join("b.mp4"));
    let a = pipeline.publish(&req_a);
    let b = pipeline.publish(&req_b);
    let (ra, rb) = tokio::join!(a, b);

    assert!(ra.is_err());
    assert!(rb.is_err());
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}
