use monorepo_kit::test_utils::{PackageFixture, TEMPLATE_AGENTS, init_test_logging};
use tempfile::TempDir;

use crate::common::run_monorepo;

fn upgrade_args<'a>(fixture: &'a PackageFixture, project: &'a TempDir) -> Vec<&'a str> {
    vec![
        "upgrade",
        "agents",
        "--package-dir",
        fixture.path().to_str().unwrap(),
        "--target",
        project.path().to_str().unwrap(),
    ]
}

#[test]
fn test_upgrade_creates_missing_agents_file() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();
    let project = TempDir::new().unwrap();

    let output = run_monorepo(project.path(), &upgrade_args(&fixture, &project)).unwrap();
    output.assert_success().assert_stdout_contains("Created");

    assert_eq!(
        std::fs::read_to_string(project.path().join("AGENTS.md")).unwrap(),
        TEMPLATE_AGENTS
    );
    assert!(fixture.is_prepared(), "upgrade prepares the assets first");
}

#[test]
fn test_upgrade_keeps_customized_sections() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();
    let project = TempDir::new().unwrap();
    std::fs::write(
        project.path().join("AGENTS.md"),
        "# My App\n\n## Build\n\ncargo build\n\n## Deploy\n\nship it\n",
    )
    .unwrap();

    let output = run_monorepo(project.path(), &upgrade_args(&fixture, &project)).unwrap();
    output.assert_success().assert_stdout_contains("Merged");

    assert_eq!(
        std::fs::read_to_string(project.path().join("AGENTS.md")).unwrap(),
        "# My App\n\n## Build\n\ncargo build\n\n## Testing\n\nnpm test\n\n## Deploy\n\nship it\n"
    );

    // A second run has nothing left to add
    let output = run_monorepo(project.path(), &upgrade_args(&fixture, &project)).unwrap();
    output.assert_success().assert_stdout_contains("Already up to date");
}

#[test]
fn test_upgrade_dry_run_prints_without_writing() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();
    let project = TempDir::new().unwrap();
    let original = "## Build\n\ncargo build\n";
    std::fs::write(project.path().join("AGENTS.md"), original).unwrap();

    let mut args = upgrade_args(&fixture, &project);
    args.push("--dry-run");
    let output = run_monorepo(project.path(), &args).unwrap();

    output
        .assert_success()
        .assert_stdout_contains("cargo build")
        .assert_stdout_contains("## Testing");
    assert_eq!(std::fs::read_to_string(project.path().join("AGENTS.md")).unwrap(), original);
}
