//! Resolved directory layout and lock timing.

use super::KitConfig;
use crate::constants::{
    AGENTS_FILE_NAME, LICENSE_FILE_NAME, LOCK_FILE_NAME, PACKAGE_DIR_ENV, TEMPLATE_MARKER_DIR,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The directories the asset preparation code works with.
///
/// Resolved once per process; every path is absolute when built by
/// [`AssetPaths::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Package root; holds the lock file.
    pub package_dir: PathBuf,
    /// Prepared assets directory.
    pub assets_dir: PathBuf,
    /// Templates directory inside the assets.
    pub templates_dir: PathBuf,
    /// Template sources copied into `assets_dir` during preparation.
    pub source_dir: PathBuf,
}

impl AssetPaths {
    /// Lay out the directories for `package_dir` according to `config`.
    #[must_use]
    pub fn from_config(package_dir: &Path, config: &KitConfig) -> Self {
        let assets_dir = package_dir.join(&config.assets.dir);
        let templates_dir = assets_dir.join(&config.assets.templates_dir);
        Self {
            package_dir: package_dir.to_path_buf(),
            source_dir: package_dir.join(&config.assets.source_dir),
            assets_dir,
            templates_dir,
        }
    }

    /// Resolve the package directory and load its configuration.
    ///
    /// The package directory comes from `MONOREPO_PACKAGE_DIR` when set,
    /// otherwise the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined or the
    /// configuration file is invalid.
    pub async fn resolve() -> Result<(Self, KitConfig)> {
        let package_dir = match std::env::var_os(PACKAGE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let package_dir = std::path::absolute(&package_dir).with_context(|| {
            format!("Failed to resolve package directory: {}", package_dir.display())
        })?;
        let config = KitConfig::load_or_default(&package_dir).await?;
        Ok((Self::from_config(&package_dir, &config), config))
    }

    /// `<package_dir>/.prepare-assets.lock`
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.package_dir.join(LOCK_FILE_NAME)
    }

    /// The paths whose joint existence defines "prepared".
    #[must_use]
    pub fn readiness_markers(&self) -> Vec<PathBuf> {
        vec![
            self.assets_dir.join(AGENTS_FILE_NAME),
            self.assets_dir.join(LICENSE_FILE_NAME),
            self.templates_dir.join(TEMPLATE_MARKER_DIR),
        ]
    }

    /// `<assets_dir>/AGENTS.md`
    #[must_use]
    pub fn agents_template(&self) -> PathBuf {
        self.assets_dir.join(AGENTS_FILE_NAME)
    }
}

/// Polling parameters for lock contention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTiming {
    /// Interval between readiness probes.
    pub poll_interval: Duration,
    /// Wait window before the single retry.
    pub timeout: Duration,
}

impl From<&KitConfig> for LockTiming {
    fn from(config: &KitConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.lock.poll_interval_ms),
            timeout: Duration::from_millis(config.lock.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let paths = AssetPaths::from_config(Path::new("/pkg"), &KitConfig::default());
        assert_eq!(paths.assets_dir, PathBuf::from("/pkg/assets"));
        assert_eq!(paths.templates_dir, PathBuf::from("/pkg/assets/templates"));
        assert_eq!(paths.source_dir, PathBuf::from("/pkg/templates"));
        assert_eq!(paths.lock_path(), PathBuf::from("/pkg/.prepare-assets.lock"));
    }

    #[test]
    fn test_readiness_markers() {
        let paths = AssetPaths::from_config(Path::new("/pkg"), &KitConfig::default());
        assert_eq!(
            paths.readiness_markers(),
            vec![
                PathBuf::from("/pkg/assets/AGENTS.md"),
                PathBuf::from("/pkg/assets/LICENSE"),
                PathBuf::from("/pkg/assets/templates/unbuild"),
            ]
        );
    }

    #[test]
    fn test_lock_timing_from_config() {
        let mut config = KitConfig::default();
        config.lock.poll_interval_ms = 5;
        config.lock.timeout_ms = 50;
        let timing = LockTiming::from(&config);
        assert_eq!(timing.poll_interval, Duration::from_millis(5));
        assert_eq!(timing.timeout, Duration::from_millis(50));

        let timing = LockTiming::from(&KitConfig::default());
        assert_eq!(timing.poll_interval, Duration::from_millis(200));
        assert_eq!(timing.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    #[serial]
    async fn test_resolve_reads_package_dir_from_env() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("monorepo.toml"), "[lock]\ntimeout_ms = 1000\n").unwrap();

        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var(PACKAGE_DIR_ENV, temp.path()) };
        let resolved = AssetPaths::resolve().await;
        unsafe { std::env::remove_var(PACKAGE_DIR_ENV) };

        let (paths, config) = resolved.unwrap();
        assert_eq!(paths.package_dir, std::path::absolute(temp.path()).unwrap());
        assert_eq!(paths.lock_path(), paths.package_dir.join(".prepare-assets.lock"));
        assert_eq!(config.lock.timeout_ms, 1000);
    }
}
