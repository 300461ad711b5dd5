//! Common test utilities for monorepo-kit integration tests

// Allow dead code because not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::cargo::CommandCargoExt;
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Environment variable naming the package directory
pub const PACKAGE_DIR_ENV: &str = "MONOREPO_PACKAGE_DIR";

/// Captured result of one `monorepo` invocation
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// Build a `monorepo` command running in `dir` with a clean environment.
pub fn monorepo_command(dir: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("monorepo").context("Failed to locate monorepo binary")?;
    cmd.current_dir(dir).env_remove(PACKAGE_DIR_ENV).env_remove("RUST_LOG").env("NO_COLOR", "1");
    Ok(cmd)
}

/// Run `monorepo` in `dir` and capture its output.
pub fn run_monorepo(dir: &Path, args: &[&str]) -> Result<CommandOutput> {
    let output = monorepo_command(dir)?.args(args).output().context("Failed to run monorepo")?;
    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
        code: output.status.code(),
    })
}

/// Start `monorepo prepare` for `package_dir` without waiting for it.
pub fn spawn_prepare(package_dir: &Path) -> Result<Child> {
    monorepo_command(package_dir)?
        .args(["prepare", "--quiet"])
        .env(PACKAGE_DIR_ENV, package_dir)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to spawn monorepo prepare")
}
