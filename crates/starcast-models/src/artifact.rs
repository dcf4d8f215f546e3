//! Media artifact handles.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Process-wide artifact creation counter.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Lifecycle role of an artifact within a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactRole {
    /// Raw capture produced by the upstream recorder.
    Raw,
    /// Stage output, owned until the next stage consumes it.
    Intermediate,
    /// Published output at the caller-requested path.
    Final,
}

impl std::fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ArtifactRole::Raw => "raw",
            ArtifactRole::Intermediate => "intermediate",
            ArtifactRole::Final => "final",
        };
        f.write_str(s)
    }
}

/// Handle to a media file on durable storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaArtifact {
    /// Location on disk.
    pub path: PathBuf,
    /// Lifecycle role.
    pub role: ArtifactRole,
    /// Monotonic creation sequence; disambiguates "most recent" between
    /// artifacts created within the same clock tick.
    pub seq: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl MediaArtifact {
    /// Create a handle with the next creation sequence.
    pub fn new(path: impl Into<PathBuf>, role: ArtifactRole) -> Self {
        Self {
            path: path.into(),
            role,
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
            created_at: Utc::now(),
        }
    }

    /// Handle to a raw capture.
    pub fn raw(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ArtifactRole::Raw)
    }

    /// Handle to a stage output.
    pub fn intermediate(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ArtifactRole::Intermediate)
    }

    /// Location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the underlying file currently exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Consume this handle once its file has been relocated to the
    /// caller-requested output path.
    pub fn into_final(self, output: impl Into<PathBuf>) -> Self {
        Self::new(output, ArtifactRole::Final)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = MediaArtifact::raw("a.mp4");
        let b = MediaArtifact::intermediate("b.mp4");
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_into_final_retags() {
        let working = MediaArtifact::intermediate("/tmp/scratch/merged_a.mp4");
        let published = working.into_final("/out/a.mp4");
        assert_eq!(published.role, ArtifactRole::Final);
        assert_eq!(published.path(), Path::new("/out/a.mp4"));
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&ArtifactRole::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }
}
