//! Race-safe preparation of template assets.
//!
//! Preparing the template assets is a one-time, idempotent filesystem side
//! effect that many processes may trigger at once (parallel package installs
//! all running the same postinstall step, for example). This module makes it
//! run once:
//!
//! - [`probe`] - "prepared" means every readiness marker exists
//! - [`lock`] - exclusive-create lock file owned by a [`LockHandle`]
//! - [`coordinator`] - the cross-process lock / wait / retry protocol
//! - [`gate`] - collapses concurrent callers inside one process onto one attempt
//! - [`prepare`] - the side effect itself, behind the [`AssetPreparer`] trait
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn example() -> anyhow::Result<()> {
//! monorepo_kit::assets::ensure_template_assets_prepared().await?;
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod gate;
pub mod lock;
pub mod prepare;
pub mod probe;

pub use coordinator::LockCoordinator;
pub use gate::PreparationGate;
pub use lock::LockHandle;
pub use prepare::{AssetPreparer, PrepareOptions, TemplateCopier};

use crate::config::{AssetPaths, KitConfig, LockTiming};
use anyhow::Result;
use tokio::sync::OnceCell;

static PROCESS_GATE: OnceCell<PreparationGate<TemplateCopier>> = OnceCell::const_new();

/// Build a gate for `paths` that copies templates with [`TemplateCopier`].
#[must_use]
pub fn template_gate(paths: AssetPaths, config: &KitConfig) -> PreparationGate<TemplateCopier> {
    let preparer = TemplateCopier::new(paths.source_dir.clone(), paths.assets_dir.clone());
    PreparationGate::new(LockCoordinator::new(paths, LockTiming::from(config), preparer))
}

/// Make sure the template assets are present.
///
/// Resolves when the assets are confirmed present: already there, prepared by
/// another process while this one waited, or prepared here. The package
/// directory and configuration are resolved on first use and reused for the
/// rest of the process.
///
/// # Errors
///
/// - [`crate::core::MonorepoError::LockContention`] (inside
///   [`crate::core::PreparationFailed`]) when another process kept the lock
///   for the whole wait window and the retry
/// - filesystem errors from lock creation or from copying the templates
/// - configuration errors from `monorepo.toml`
pub async fn ensure_template_assets_prepared() -> Result<()> {
    let gate = PROCESS_GATE
        .get_or_try_init(|| async {
            let (paths, config) = AssetPaths::resolve().await?;
            Ok::<_, anyhow::Error>(template_gate(paths, &config))
        })
        .await?;
    gate.ensure().await
}

/// The paths used by [`ensure_template_assets_prepared`], once it has run.
#[must_use]
pub fn process_asset_paths() -> Option<&'static AssetPaths> {
    PROCESS_GATE.get().map(|gate| gate.coordinator().paths())
}
