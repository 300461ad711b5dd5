//! Cross-process coordination of asset preparation.
//!
//! Several independent processes (parallel package installs, for example) may
//! all decide at once that the template assets need preparing. The
//! [`LockCoordinator`] makes sure the preparation runs in one of them while the
//! others wait for its result:
//!
//! ```text
//! prepared? ──yes──▶ done (no lock taken)
//!     │no
//! create lock ──ok──▶ prepare ──▶ release lock ──▶ done
//!     │exists
//! poll readiness every interval, up to the wait window
//!     ├─ prepared ──▶ done (lock never taken)
//!     └─ window elapsed ──▶ create lock once more
//!                              ├─ ok ──▶ prepare ──▶ release ──▶ done
//!                              └─ exists ──▶ LockContention error
//! ```
//!
//! The single retry after the wait window lets a waiter take over from a
//! holder that crashed without deleting its lock. Under such a crash two
//! processes can end up preparing at the same time; that is tolerated because
//! preparation inside the lock never overwrites existing files.

use super::lock::LockHandle;
use super::prepare::{AssetPreparer, PrepareOptions};
use super::probe;
use crate::config::{AssetPaths, LockTiming};
use crate::core::MonorepoError;
use anyhow::Result;
use std::path::PathBuf;
use tokio::time::Instant;
use tracing::{debug, info};

/// Runs the lock protocol around an [`AssetPreparer`].
#[derive(Debug)]
pub struct LockCoordinator<P> {
    paths: AssetPaths,
    timing: LockTiming,
    preparer: P,
}

impl<P: AssetPreparer> LockCoordinator<P> {
    #[must_use]
    pub const fn new(paths: AssetPaths, timing: LockTiming, preparer: P) -> Self {
        Self {
            paths,
            timing,
            preparer,
        }
    }

    #[must_use]
    pub const fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// Ensure the assets are prepared, preparing them here if no other
    /// process does.
    ///
    /// # Errors
    ///
    /// - [`MonorepoError::LockContention`] when the lock is still held after
    ///   the wait window and the retry
    /// - any I/O error from creating the lock file
    /// - any error from the preparer (the lock is released first)
    pub async fn run(&self) -> Result<()> {
        let markers = self.paths.readiness_markers();
        if probe::all_exist(&markers).await {
            debug!("Template assets already prepared");
            return Ok(());
        }

        let lock_path = self.paths.lock_path();
        let handle = match LockHandle::try_acquire(&lock_path).await? {
            Some(handle) => handle,
            None => {
                if self.wait_for_prepared(&markers).await {
                    debug!("Template assets prepared by another process");
                    return Ok(());
                }
                LockHandle::try_acquire(&lock_path).await?.ok_or_else(|| {
                    MonorepoError::LockContention {
                        lock_path: lock_path.display().to_string(),
                    }
                })?
            }
        };

        info!(lock_path = %lock_path.display(), "Preparing template assets under lock");
        let result = self.preparer.prepare(PrepareOptions::non_destructive()).await;
        handle.release().await;
        result
    }

    /// Poll readiness until it holds or the wait window elapses.
    async fn wait_for_prepared(&self, markers: &[PathBuf]) -> bool {
        let start = Instant::now();
        let deadline = start + self.timing.timeout;
        debug!(timeout_ms = self.timing.timeout.as_millis(), "Waiting for preparation lock holder");

        while Instant::now() < deadline {
            if probe::all_exist(markers).await {
                return true;
            }
            tokio::time::sleep(self.timing.poll_interval).await;
        }

        debug!(
            waited_ms = start.elapsed().as_millis(),
            "Gave up waiting, retrying the preparation lock"
        );
        false
    }
}
