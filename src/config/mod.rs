//! Configuration for monorepo-kit
//!
//! Configuration is per package: an optional `monorepo.toml` next to the
//! package's assets describes where the assets and their sources live and how
//! patiently a process waits on another one that is preparing them.
//!
//! - [`KitConfig`] - the deserialized `monorepo.toml`
//! - [`AssetPaths`] - the directory layout derived from it, resolved once per process
//! - [`LockTiming`] - polling interval and wait window for lock contention

mod kit;
mod paths;

pub use kit::{AssetsSection, KitConfig, LockSection};
pub use paths::{AssetPaths, LockTiming};
