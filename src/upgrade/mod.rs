//! In-place upgrades of files generated from templates.
//!
//! An upgrade reconciles a freshly prepared template with the copy a project
//! already has, keeping whatever the project customized.
//!
//! - [`agents`] - AGENTS.md, merged section by section

pub mod agents;

pub use agents::{AgentsUpgrade, AgentsUpgradeOutcome, upgrade_agents_file};
