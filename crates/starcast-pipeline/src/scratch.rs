//! Per-run scratch space.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

/// Scratch directory owned by a single publish run.
///
/// Every run gets its own uuid-named directory under the configured scratch
/// root, so concurrent runs over the same raw input can never collide on
/// intermediate paths. The owning run removes the whole directory on both
/// the success and the failure path.
#[derive(Debug)]
pub struct ScratchSpace {
    dir: PathBuf,
    run_id: Uuid,
}

impl ScratchSpace {
    /// Create `<root>/publish-<run-id>/`.
    pub async fn create(root: &Path) -> std::io::Result<Self> {
        let run_id = Uuid::new_v4();
        let dir = root.join(format!("publish-{run_id}"));
        fs::create_dir_all(&dir).await?;
        Ok(Self { dir, run_id })
    }

    /// Identifier for this run, used in scratch naming and log fields.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The run's scratch directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a stage output, named after the stage and the source file.
    pub fn stage_path(&self, stage: &str, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "capture.mp4".to_string());
        self.dir.join(format!("{stage}_{name}"))
    }

    /// Remove the directory and every intermediate inside it.
    pub async fn cleanup(self) -> std::io::Result<()> {
        fs::remove_dir_all(&self.dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_runs_get_disjoint_directories() {
        let root = TempDir::new().unwrap();
        let a = ScratchSpace::create(root.path()).await.unwrap();
        let b = ScratchSpace::create(root.path()).await.unwrap();
        assert_ne!(a.dir(), b.dir());
        assert_ne!(a.run_id(), b.run_id());
    }

    #[tokio::test]
    async fn test_stage_path_naming() {
        let root = TempDir::new().unwrap();
        let scratch = ScratchSpace::create(root.path()).await.unwrap();
        let path = scratch.stage_path("optimized", Path::new("/captures/orbit.mp4"));
        assert_eq!(path.file_name().unwrap(), "optimized_orbit.mp4");
        assert!(path.starts_with(scratch.dir()));
    }

    #[tokio::test]
    async fn test_cleanup_removes_intermediates() {
        let root = TempDir::new().unwrap();
        let scratch = ScratchSpace::create(root.path()).await.unwrap();
        let dir = scratch.dir().to_path_buf();
        fs::write(dir.join("optimized_orbit.mp4"), b"x").await.unwrap();

        scratch.cleanup().await.unwrap();

        assert!(!dir.exists());
    }
}
