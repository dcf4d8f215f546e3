//! Filesystem utilities for the publish step.
//!
//! The final relocate must be atomic from the destination's point of view:
//! either the whole file appears at the output path or none of it does,
//! including when scratch and destination live on different filesystems.

use std::path::Path;

use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Move a file from `src` to `dst`, handling cross-device moves.
///
/// Attempts a fast rename first. On EXDEV (cross-device link) it falls back
/// to copying into a temporary file beside `dst` and renaming that into
/// place, so the destination is never observable partially written.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    ensure_parent(dst).await?;

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            tracing::debug!(
                src = %src.display(),
                dst = %dst.display(),
                "Cross-device rename, falling back to copy+rename"
            );
            copy_and_delete(src, dst).await
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

async fn ensure_parent(dst: &Path) -> MediaResult<()> {
    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Copy to a temp file on the destination filesystem, rename into place,
/// then delete the source.
async fn copy_and_delete(src: &Path, dst: &Path) -> MediaResult<()> {
    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await.map_err(|e| {
        tracing::error!(
            src = %src.display(),
            tmp = %tmp_dst.display(),
            error = %e,
            "Copy failed during cross-device move"
        );
        MediaError::from(e)
    })?;

    // Atomic rename on the destination filesystem
    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = std::fs::remove_file(&tmp_dst);
        tracing::error!(
            tmp = %tmp_dst.display(),
            dst = %dst.display(),
            error = %e,
            "Rename failed during cross-device move"
        );
        return Err(MediaError::from(e));
    }

    // Best effort; the published file is already in place
    if let Err(e) = fs::remove_file(src).await {
        tracing::warn!(
            src = %src.display(),
            error = %e,
            "Failed to remove source after cross-device move"
        );
    }

    Ok(())
}
