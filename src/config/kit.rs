//! Per-package configuration (`monorepo.toml`).
//!
//! The file is optional. Every field has a default, so a package without a
//! configuration file behaves exactly like one with an empty file.
//!
//! ```toml
//! [assets]
//! dir = "assets"
//! templates_dir = "templates"
//! source_dir = "templates"
//!
//! [lock]
//! poll_interval_ms = 200
//! timeout_ms = 30000
//! ```

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_ASSETS_DIR, DEFAULT_SOURCE_DIR, DEFAULT_TEMPLATES_DIR,
    LOCK_POLL_INTERVAL_MS, LOCK_TIMEOUT_MS,
};
use crate::core::MonorepoError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Configuration loaded from `monorepo.toml` in the package directory.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KitConfig {
    /// Where assets live and where their sources are read from.
    #[serde(default)]
    pub assets: AssetsSection,

    /// Timing of the cross-process preparation lock.
    #[serde(default)]
    pub lock: LockSection,
}

/// `[assets]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetsSection {
    /// Assets directory, relative to the package directory.
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,

    /// Templates directory, relative to the assets directory.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Directory the template sources are copied from, relative to the
    /// package directory.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
            templates_dir: default_templates_dir(),
            source_dir: default_source_dir(),
        }
    }
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ASSETS_DIR)
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATES_DIR)
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

/// `[lock]` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LockSection {
    /// Interval between readiness probes while waiting on another process.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// How long to wait before retrying the lock.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LockSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

const fn default_poll_interval_ms() -> u64 {
    LOCK_POLL_INTERVAL_MS
}

const fn default_timeout_ms() -> u64 {
    LOCK_TIMEOUT_MS
}

impl KitConfig {
    /// Load `monorepo.toml` from `package_dir`, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// the parsed values are invalid.
    pub async fn load_or_default(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(CONFIG_FILE_NAME);
        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (permissions, not found, etc.)
    /// - The file contains invalid TOML syntax
    /// - A value fails validation (e.g. a zero poll interval)
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(MonorepoError::from)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as pretty-formatted TOML, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created, serialization fails,
    /// or the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.lock.poll_interval_ms == 0 {
            return Err(MonorepoError::ConfigError {
                message: "lock.poll_interval_ms must be greater than zero".to_string(),
            }
            .into());
        }
        if self.assets.dir.is_absolute()
            || self.assets.templates_dir.is_absolute()
            || self.assets.source_dir.is_absolute()
        {
            return Err(MonorepoError::ConfigError {
                message: "assets directories must be relative paths".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
