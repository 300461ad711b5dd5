//! Command-line interface for monorepo-kit.
//!
//! - `prepare` - make sure the template assets are in place
//! - `upgrade agents` - merge the AGENTS.md template into a project
//! - `merge` - merge two AGENTS-style markdown files
//!
//! # Examples
//!
//! ```bash
//! monorepo prepare
//! monorepo upgrade agents --target ../my-app --dry-run
//! monorepo merge templates/AGENTS.md AGENTS.md --write
//! ```

pub mod common;
mod merge;
mod prepare;
mod upgrade;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "monorepo",
    about = "Project scaffolding toolkit - prepare template assets and upgrade generated files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prepare template assets (safe to run concurrently)
    Prepare(prepare::PrepareCommand),

    /// Upgrade template-generated files in a project
    Upgrade(upgrade::UpgradeCommand),

    /// Merge a template markdown file into a customized one
    Merge(merge::MergeCommand),
}

impl Cli {
    /// Log filter for this invocation: `--verbose` and `--quiet` win over
    /// `RUST_LOG`, which wins over the `warn` default.
    #[must_use]
    pub fn log_filter(&self) -> EnvFilter {
        if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Prepare(cmd) => cmd.execute(self.quiet).await,
            Commands::Upgrade(cmd) => cmd.execute(self.quiet).await,
            Commands::Merge(cmd) => cmd.execute().await,
        }
    }
}
