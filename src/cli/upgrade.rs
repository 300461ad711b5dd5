//! `monorepo upgrade` - reconcile template-generated files with a project.

use super::common::PackageArgs;
use crate::constants::AGENTS_FILE_NAME;
use crate::upgrade::{AgentsUpgradeOutcome, upgrade_agents_file};
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct UpgradeCommand {
    #[command(subcommand)]
    target: UpgradeTarget,
}

#[derive(Subcommand, Debug)]
enum UpgradeTarget {
    /// Merge the AGENTS.md template into the project's AGENTS.md
    Agents(AgentsArgs),
}

#[derive(Args, Debug)]
struct AgentsArgs {
    #[command(flatten)]
    package: PackageArgs,

    /// Project directory whose AGENTS.md is upgraded
    #[arg(long, default_value = ".")]
    target: PathBuf,

    /// Print the merged document instead of writing it
    #[arg(long)]
    dry_run: bool,
}

impl UpgradeCommand {
    pub async fn execute(self, quiet: bool) -> Result<()> {
        match self.target {
            UpgradeTarget::Agents(args) => args.execute(quiet).await,
        }
    }
}

impl AgentsArgs {
    async fn execute(self, quiet: bool) -> Result<()> {
        let paths = self.package.ensure_assets().await?;
        let target_path = self.target.join(AGENTS_FILE_NAME);
        let upgrade =
            upgrade_agents_file(&paths.agents_template(), &target_path, self.dry_run).await?;

        if self.dry_run {
            print!("{}", upgrade.content);
            return Ok(());
        }

        if !quiet {
            let verb = match upgrade.outcome {
                AgentsUpgradeOutcome::Created => "Created",
                AgentsUpgradeOutcome::Merged => "Merged template into",
                AgentsUpgradeOutcome::Unchanged => "Already up to date:",
            };
            println!("{} {} {}", "✓".green(), verb, target_path.display());
        }
        Ok(())
    }
}
