//! Test utilities for monorepo-kit
//!
//! Helpers shared by unit and integration tests: one-time tracing setup and a
//! throwaway package directory laid out the way the asset preparation expects.
//!
//! # Example
//!
//! ```rust,no_run
//! use monorepo_kit::test_utils::{PackageFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let fixture = PackageFixture::new().unwrap();
//! assert!(!fixture.is_prepared());
//! ```

use crate::config::{AssetPaths, KitConfig};
use crate::constants::{
    AGENTS_FILE_NAME, CONFIG_FILE_NAME, LICENSE_FILE_NAME, TEMPLATE_MARKER_DIR,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// AGENTS.md shipped by [`PackageFixture`].
pub const TEMPLATE_AGENTS: &str =
    "# Project Guidelines\n\n## Build\n\nnpm run build\n\n## Testing\n\nnpm test\n";

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None` the `RUST_LOG` environment
/// variable decides, and nothing is logged when it is unset.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A temporary package directory with template sources but no prepared
/// assets.
pub struct PackageFixture {
    temp: TempDir,
}

impl PackageFixture {
    /// Create the package with the default `monorepo.toml` layout.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let fixture = Self { temp };
        let source = fixture.paths().source_dir;
        let marker_dir = source.join("templates").join(TEMPLATE_MARKER_DIR);
        std::fs::create_dir_all(&marker_dir)?;
        std::fs::write(marker_dir.join("index.ts"), "export {};\n")?;
        std::fs::write(source.join(AGENTS_FILE_NAME), TEMPLATE_AGENTS)?;
        std::fs::write(source.join(LICENSE_FILE_NAME), "MIT License\n")?;
        Ok(fixture)
    }

    /// Root of the package.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Asset layout for the default configuration.
    pub fn paths(&self) -> AssetPaths {
        AssetPaths::from_config(self.temp.path(), &KitConfig::default())
    }

    /// Write a `monorepo.toml` with the given lock timing.
    pub async fn write_lock_timing(&self, poll_interval_ms: u64, timeout_ms: u64) -> Result<()> {
        let mut config = KitConfig::default();
        config.lock.poll_interval_ms = poll_interval_ms;
        config.lock.timeout_ms = timeout_ms;
        config.save_to(&self.temp.path().join(CONFIG_FILE_NAME)).await
    }

    /// Leave a lock file behind as if another process held it.
    pub fn hold_lock(&self) -> Result<PathBuf> {
        let lock_path = self.paths().lock_path();
        std::fs::write(&lock_path, "")?;
        Ok(lock_path)
    }

    /// Whether every readiness marker exists.
    pub fn is_prepared(&self) -> bool {
        self.paths().readiness_markers().iter().all(|marker| marker.exists())
    }
}
