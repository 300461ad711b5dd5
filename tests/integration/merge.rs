use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::{monorepo_command, run_monorepo};

fn write_pair(dir: &TempDir, source: &str, target: &str) {
    std::fs::write(dir.path().join("template.md"), source).unwrap();
    std::fs::write(dir.path().join("AGENTS.md"), target).unwrap();
}

#[test]
fn test_merge_prints_result() {
    let temp = TempDir::new().unwrap();
    write_pair(&temp, "## A\nsource a\n## B\nsource b\n", "## A\ntarget a\n");

    let output = run_monorepo(temp.path(), &["merge", "template.md", "AGENTS.md"]).unwrap();

    output.assert_success();
    assert_eq!(output.stdout, "## A\ntarget a\n\n## B\nsource b\n");
    assert_eq!(
        std::fs::read_to_string(temp.path().join("AGENTS.md")).unwrap(),
        "## A\ntarget a\n"
    );
}

#[test]
fn test_merge_write_updates_target() {
    let temp = TempDir::new().unwrap();
    write_pair(&temp, "a\nb\n", "a\nc\n");

    let mut cmd = monorepo_command(temp.path()).unwrap();
    let output = cmd.args(["merge", "template.md", "AGENTS.md", "--write"]).output().unwrap();

    assert!(output.status.success());
    assert!(predicate::str::is_empty().eval(String::from_utf8_lossy(&output.stdout).as_ref()));
    assert_eq!(std::fs::read_to_string(temp.path().join("AGENTS.md")).unwrap(), "a\nc\nb\n");
}

#[test]
fn test_merge_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("AGENTS.md"), "## A\n").unwrap();

    let output = run_monorepo(temp.path(), &["merge", "missing.md", "AGENTS.md"]).unwrap();

    assert!(!output.success);
    output.assert_stderr_contains("missing.md");
}
