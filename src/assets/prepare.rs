//! The preparation side effect guarded by the lock.
//!
//! [`AssetPreparer`] is the seam between the coordination code and whatever
//! actually populates the assets directory. [`TemplateCopier`] is the default
//! implementation: it copies a bundled template tree into the assets
//! directory.

use crate::core::MonorepoError;
use crate::utils::fs::copy_tree;
use anyhow::{Context, Result};
use colored::Colorize;
use std::future::Future;
use std::path::PathBuf;
use tracing::info;

/// Options understood by an [`AssetPreparer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareOptions {
    /// When false, a file that already exists is never replaced.
    pub overwrite_existing: bool,
    /// When true, no progress output is printed.
    pub silent: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            overwrite_existing: true,
            silent: false,
        }
    }
}

impl PrepareOptions {
    /// Options used inside the lock: keep whatever a racing process already
    /// wrote, and stay quiet.
    #[must_use]
    pub const fn non_destructive() -> Self {
        Self {
            overwrite_existing: false,
            silent: true,
        }
    }
}

/// Populates the assets directory.
///
/// Implementations must be idempotent when called with
/// `overwrite_existing == false`: running twice, or concurrently from two
/// processes, may duplicate work but must not corrupt the result.
pub trait AssetPreparer: Send + Sync + 'static {
    /// Copy every template asset into place.
    fn prepare(&self, options: PrepareOptions) -> impl Future<Output = Result<()>> + Send;
}

/// Copies a template source tree into the assets directory.
#[derive(Debug, Clone)]
pub struct TemplateCopier {
    source_dir: PathBuf,
    assets_dir: PathBuf,
}

impl TemplateCopier {
    #[must_use]
    pub const fn new(source_dir: PathBuf, assets_dir: PathBuf) -> Self {
        Self {
            source_dir,
            assets_dir,
        }
    }
}

impl AssetPreparer for TemplateCopier {
    async fn prepare(&self, options: PrepareOptions) -> Result<()> {
        if !tokio::fs::try_exists(&self.source_dir).await.unwrap_or(false) {
            return Err(MonorepoError::FileSystemError {
                operation: "read template sources".to_string(),
                path: self.source_dir.display().to_string(),
            }
            .into());
        }

        info!(
            source = %self.source_dir.display(),
            assets = %self.assets_dir.display(),
            overwrite_existing = options.overwrite_existing,
            "Preparing template assets"
        );

        let source = self.source_dir.clone();
        let assets = self.assets_dir.clone();
        let report = tokio::task::spawn_blocking(move || {
            copy_tree(&source, &assets, options.overwrite_existing)
        })
        .await
        .context("spawn_blocking panicked")?
        .with_context(|| {
            format!("Failed to copy template assets into {}", self.assets_dir.display())
        })?;

        if !options.silent {
            for path in &report.copied {
                println!("  {} {}", "copied".green(), path.display());
            }
            println!(
                "{} {} file(s) copied, {} already present",
                "✓".green(),
                report.copied.len(),
                report.skipped.len()
            );
        }

        info!(
            copied = report.copied.len(),
            skipped = report.skipped.len(),
            "Template assets prepared"
        );
        Ok(())
    }
}
