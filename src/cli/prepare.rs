//! `monorepo prepare` - make sure the template assets are in place.
//!
//! Safe to run from many processes at once: one of them copies the templates
//! while the others wait for it.

use super::common::PackageArgs;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct PrepareCommand {
    #[command(flatten)]
    package: PackageArgs,
}

impl PrepareCommand {
    pub async fn execute(self, quiet: bool) -> Result<()> {
        let paths = self.package.ensure_assets().await?;
        if !quiet {
            println!(
                "{} Template assets ready in {}",
                "✓".green(),
                paths.assets_dir.display()
            );
        }
        Ok(())
    }
}
