//! Raw capture discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{PipelineError, PipelineResult};

/// Find the most recently modified capture in `dir`.
///
/// The upstream recorder saves to its own location at an unpredictable
/// time, so newest-mtime is the selection rule; ties fall to the entry
/// seen last.
pub fn find_latest_capture(dir: &Path) -> PipelineResult<PathBuf> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        let is_capture = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("mp4"));
        if !is_capture {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(t, _)| modified >= *t) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or_else(|| PipelineError::InputNotFound(dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_with_mtime(dir: &Path, name: &str, age: Duration) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"capture").unwrap();
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
        path
    }

    #[test]
    fn test_picks_newest_capture() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "old.mp4", Duration::from_secs(600));
        let newest = write_with_mtime(dir.path(), "new.mp4", Duration::from_secs(5));
        write_with_mtime(dir.path(), "older.mp4", Duration::from_secs(3600));

        assert_eq!(find_latest_capture(dir.path()).unwrap(), newest);
    }

    #[test]
    fn test_ignores_non_captures() {
        let dir = TempDir::new().unwrap();
        write_with_mtime(dir.path(), "notes.txt", Duration::from_secs(1));
        let capture = write_with_mtime(dir.path(), "orbit.mp4", Duration::from_secs(600));

        assert_eq!(find_latest_capture(dir.path()).unwrap(), capture);
    }

    #[test]
    fn test_empty_directory_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let err = find_latest_capture(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound(_)));
    }
}
