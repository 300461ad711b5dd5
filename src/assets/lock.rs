//! Exclusive-create lock file for cross-process coordination.
//!
//! The lock is a zero-length marker file. Creating it with create-only
//! semantics (`O_CREAT | O_EXCL`) is both the mutual exclusion primitive and
//! the race detector: exactly one process can create it, and everyone else
//! learns about the contention from the same atomic operation.
//!
//! # Async Safety
//!
//! The create is wrapped in `spawn_blocking` to avoid blocking the tokio
//! runtime on slow filesystems.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Exclusive ownership of a lock file.
///
/// Created by a successful exclusive create. Releasing closes the handle and
/// deletes the file; both steps are best-effort and never report errors.
/// [`LockHandle::release`] is the normal path; if the handle is dropped
/// without it (task cancelled, critical section panicked), `Drop` performs the
/// same cleanup synchronously. Cleanup runs exactly once either way.
#[derive(Debug)]
pub struct LockHandle {
    file: Option<File>,
    lock_path: PathBuf,
    released: bool,
}

impl LockHandle {
    /// Try to claim `lock_path`.
    ///
    /// Returns `Ok(None)` when the file already exists (another holder), and
    /// `Ok(Some(handle))` when this call created it.
    ///
    /// # Errors
    ///
    /// Any failure other than "already exists" (missing parent directory,
    /// permission denied, read-only filesystem, ...) is returned unchanged
    /// with the lock path attached as context.
    pub async fn try_acquire(lock_path: &Path) -> Result<Option<Self>> {
        let path = lock_path.to_path_buf();
        let created = tokio::task::spawn_blocking(move || {
            OpenOptions::new().write(true).create_new(true).open(&path)
        })
        .await
        .context("spawn_blocking panicked")?;

        match created {
            Ok(file) => {
                debug!(lock_path = %lock_path.display(), "Preparation lock acquired");
                Ok(Some(Self {
                    file: Some(file),
                    lock_path: lock_path.to_path_buf(),
                    released: false,
                }))
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(lock_path = %lock_path.display(), "Preparation lock is held elsewhere");
                Ok(None)
            }
            Err(e) => Err(e)
                .with_context(|| format!("Failed to create lock file: {}", lock_path.display())),
        }
    }

    /// Path of the lock file this handle owns.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.lock_path
    }

    /// Close the handle, then delete the lock file.
    pub async fn release(mut self) {
        self.released = true;
        drop(self.file.take());
        if let Err(e) = tokio::fs::remove_file(&self.lock_path).await {
            log_cleanup_failure(&self.lock_path, &e);
        }
        debug!(lock_path = %self.lock_path.display(), "Preparation lock released");
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        drop(self.file.take());
        if let Err(e) = std::fs::remove_file(&self.lock_path) {
            log_cleanup_failure(&self.lock_path, &e);
        }
        debug!(lock_path = %self.lock_path.display(), "Preparation lock released on drop");
    }
}

fn log_cleanup_failure(lock_path: &Path, error: &std::io::Error) {
    // Someone else already removed it (e.g. a manual stale-lock cleanup).
    if error.kind() == ErrorKind::NotFound {
        return;
    }
    warn!(lock_path = %lock_path.display(), error = %error, "Failed to remove lock file");
}
