//! In-place upgrade of a project's AGENTS.md from the template.

use crate::core::MonorepoError;
use crate::markdown::merge_agents_markdown;
use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// What [`upgrade_agents_file`] did (or would do, in a dry run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentsUpgradeOutcome {
    /// The project had no AGENTS.md; the template was copied as-is.
    Created,
    /// The template was merged into the existing file.
    Merged,
    /// Merging produced the existing content byte for byte.
    Unchanged,
}

/// Result of an AGENTS.md upgrade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentsUpgrade {
    pub outcome: AgentsUpgradeOutcome,
    /// The document that was (or would be) written.
    pub content: String,
}

/// Bring `target_path` up to date with the template at `template_path`.
///
/// Sections the user customized are kept, sections new in the template are
/// added. With `dry_run` nothing is written.
///
/// # Errors
///
/// Returns [`MonorepoError::MarkdownNotFound`] if the template is missing, or
/// an I/O error if either file cannot be read or the result cannot be written.
pub async fn upgrade_agents_file(
    template_path: &Path,
    target_path: &Path,
    dry_run: bool,
) -> Result<AgentsUpgrade> {
    let template = match tokio::fs::read_to_string(template_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MonorepoError::MarkdownNotFound {
                path: template_path.display().to_string(),
            }
            .into());
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to read AGENTS template: {}", template_path.display())
            });
        }
    };

    let existing = match tokio::fs::read_to_string(target_path).await {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to read {}", target_path.display()));
        }
    };

    let upgrade = match existing {
        None => AgentsUpgrade {
            outcome: AgentsUpgradeOutcome::Created,
            content: template,
        },
        Some(existing) => {
            let merged = merge_agents_markdown(&template, &existing);
            let outcome = if merged == existing {
                AgentsUpgradeOutcome::Unchanged
            } else {
                AgentsUpgradeOutcome::Merged
            };
            AgentsUpgrade {
                outcome,
                content: merged,
            }
        }
    };

    if dry_run || upgrade.outcome == AgentsUpgradeOutcome::Unchanged {
        debug!(target = %target_path.display(), outcome = ?upgrade.outcome, dry_run, "Not writing AGENTS.md");
        return Ok(upgrade);
    }

    let path = target_path.to_path_buf();
    let content = upgrade.content.clone();
    tokio::task::spawn_blocking(move || atomic_write(&path, content.as_bytes()))
        .await
        .context("spawn_blocking panicked")??;
    info!(target = %target_path.display(), outcome = ?upgrade.outcome, "AGENTS.md upgraded");

    Ok(upgrade)
}
