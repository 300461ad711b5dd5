//! Integration test suite for monorepo-kit
//!
//! End-to-end tests driving the `monorepo` binary against temporary package
//! directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **prepare**: asset preparation, including several processes racing for the lock
//! - **upgrade_agents**: `upgrade agents` against a project's AGENTS.md
//! - **merge**: the standalone `merge` command

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod merge;
mod prepare;
mod upgrade_agents;
