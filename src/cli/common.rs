//! Arguments and helpers shared by several commands.

use crate::assets::{ensure_template_assets_prepared, process_asset_paths, template_gate};
use crate::config::{AssetPaths, KitConfig};
use anyhow::{Context, Result, anyhow};
use clap::Args;
use std::path::PathBuf;

/// Selects the package whose assets a command works with.
#[derive(Args, Debug, Clone, Default)]
pub struct PackageArgs {
    /// Package directory holding the assets (defaults to the current directory)
    #[arg(long, env = "MONOREPO_PACKAGE_DIR")]
    pub package_dir: Option<PathBuf>,
}

impl PackageArgs {
    /// Make sure the package's template assets are prepared and return their
    /// layout.
    ///
    /// Without an explicit package directory this goes through the
    /// process-wide gate.
    pub async fn ensure_assets(&self) -> Result<AssetPaths> {
        let Some(dir) = &self.package_dir else {
            ensure_template_assets_prepared().await?;
            return process_asset_paths()
                .cloned()
                .ok_or_else(|| anyhow!("Template asset paths were not resolved"));
        };

        let dir = std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve package directory: {}", dir.display()))?;
        let config = KitConfig::load_or_default(&dir).await?;
        let paths = AssetPaths::from_config(&dir, &config);
        template_gate(paths.clone(), &config).ensure().await?;
        Ok(paths)
    }
}
