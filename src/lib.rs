//! monorepo-kit - template assets and AGENTS.md upkeep for scaffolded projects
//!
//! A scaffolding package ships templates that have to be copied into an
//! `assets/` directory before use. Many processes may need them at the same
//! moment (parallel installs in a monorepo all running the same setup step),
//! so preparation is coordinated through a lock file next to the package and
//! collapsed onto a single attempt inside each process.
//!
//! The second half of the crate keeps a project's `AGENTS.md` in step with the
//! template: template sections the project lacks are added, sections the
//! project customized are left alone.
//!
//! # Modules
//!
//! - [`assets`] - cross-process lock, readiness probe and in-process gate
//! - [`markdown`] - `##`-section parsing and the AGENTS.md merge
//! - [`upgrade`] - applying the merge to a project's files
//! - [`config`] - `monorepo.toml` and the resolved asset layout
//! - [`core`] - error types and user-facing error rendering
//! - [`cli`] - the `monorepo` command-line interface
//! - [`utils`] - filesystem helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use monorepo_kit::{ensure_template_assets_prepared, merge_agents_markdown};
//!
//! # async fn example() -> anyhow::Result<()> {
//! ensure_template_assets_prepared().await?;
//!
//! let merged = merge_agents_markdown("## Build\n\nnpm run build\n", "## Build\n\npnpm build\n");
//! assert_eq!(merged, "## Build\n\npnpm build\n");
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod markdown;
pub mod upgrade;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use assets::ensure_template_assets_prepared;
pub use markdown::merge_agents_markdown;
