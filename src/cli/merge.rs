//! `monorepo merge` - merge two AGENTS-style markdown files.

use crate::markdown::merge_agents_markdown;
use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MergeCommand {
    /// Template document whose missing sections are added
    source: PathBuf,

    /// Customized document whose sections take precedence
    target: PathBuf,

    /// Write the result into TARGET instead of printing it
    #[arg(long)]
    write: bool,
}

impl MergeCommand {
    pub async fn execute(self) -> Result<()> {
        let source = tokio::fs::read_to_string(&self.source)
            .await
            .with_context(|| format!("Failed to read {}", self.source.display()))?;
        let target = tokio::fs::read_to_string(&self.target)
            .await
            .with_context(|| format!("Failed to read {}", self.target.display()))?;

        let merged = merge_agents_markdown(&source, &target);

        if self.write {
            atomic_write(&self.target, merged.as_bytes())?;
        } else {
            print!("{merged}");
        }
        Ok(())
    }
}
