//! Global constants used throughout the toolkit.
//!
//! This module contains file names, timeouts and polling parameters
//! shared by the asset preparation and upgrade code.

/// Name of the lock file created in the package directory while template
/// assets are being prepared.
pub const LOCK_FILE_NAME: &str = ".prepare-assets.lock";

/// Interval between readiness probes while another process holds the lock (200ms).
pub const LOCK_POLL_INTERVAL_MS: u64 = 200;

/// How long a waiter polls before retrying the lock itself (30 seconds).
pub const LOCK_TIMEOUT_MS: u64 = 30_000;

/// Agent instructions document, both a readiness marker and the upgrade target.
pub const AGENTS_FILE_NAME: &str = "AGENTS.md";

/// License file shipped with the assets.
pub const LICENSE_FILE_NAME: &str = "LICENSE";

/// Template directory whose presence marks the templates as copied.
pub const TEMPLATE_MARKER_DIR: &str = "unbuild";

/// Optional per-package configuration file.
pub const CONFIG_FILE_NAME: &str = "monorepo.toml";

/// Environment variable overriding the package directory.
pub const PACKAGE_DIR_ENV: &str = "MONOREPO_PACKAGE_DIR";

/// Default assets directory, relative to the package directory.
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Default templates directory, relative to the assets directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default template source directory, relative to the package directory.
pub const DEFAULT_SOURCE_DIR: &str = "templates";
