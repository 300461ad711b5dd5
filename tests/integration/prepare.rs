use monorepo_kit::test_utils::{PackageFixture, TEMPLATE_AGENTS, init_test_logging};
use std::time::{Duration, Instant};

use crate::common::{PACKAGE_DIR_ENV, monorepo_command, run_monorepo, spawn_prepare};

/// A fresh package gets its assets and no lock file is left behind
#[test]
fn test_prepare_fresh_package() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();

    let output = run_monorepo(fixture.path(), &["prepare"]).unwrap();
    output.assert_success().assert_stdout_contains("Template assets ready");

    assert!(fixture.is_prepared());
    let paths = fixture.paths();
    assert_eq!(
        std::fs::read_to_string(paths.agents_template()).unwrap(),
        TEMPLATE_AGENTS
    );
    assert!(!paths.lock_path().exists());
}

/// Many processes preparing the same package at once all succeed
#[test]
fn test_concurrent_processes_prepare_once() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();

    let children: Vec<_> = (0..8).map(|_| spawn_prepare(fixture.path()).unwrap()).collect();
    for child in children {
        let output = child.wait_with_output().unwrap();
        assert!(
            output.status.success(),
            "prepare failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    assert!(fixture.is_prepared());
    assert!(!fixture.paths().lock_path().exists());
}

/// Prepared assets short-circuit before the lock is ever looked at
#[test]
fn test_prepared_package_ignores_leftover_lock() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();
    run_monorepo(fixture.path(), &["prepare"]).unwrap().assert_success();

    let lock_path = fixture.hold_lock().unwrap();
    let started = Instant::now();
    run_monorepo(fixture.path(), &["prepare"]).unwrap().assert_success();

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(lock_path.exists());
}

/// A lock that is never released ends in a contention error naming the lock
#[tokio::test]
async fn test_stale_lock_reports_contention() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();
    fixture.write_lock_timing(20, 200).await.unwrap();
    let lock_path = fixture.hold_lock().unwrap();

    let output = run_monorepo(fixture.path(), &["prepare"]).unwrap();

    assert!(!output.success);
    assert_eq!(output.code, Some(1));
    output
        .assert_stderr_contains("lock is held at")
        .assert_stderr_contains(".prepare-assets.lock");
    assert!(lock_path.exists(), "a lock owned by someone else must not be removed");
    assert!(!fixture.is_prepared());
}

/// The package directory can come from the environment
#[test]
fn test_package_dir_from_env() {
    init_test_logging(None);
    let fixture = PackageFixture::new().unwrap();
    let elsewhere = tempfile::TempDir::new().unwrap();

    let output = monorepo_command(elsewhere.path())
        .unwrap()
        .arg("prepare")
        .env(PACKAGE_DIR_ENV, fixture.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(fixture.is_prepared());
    assert!(!elsewhere.path().join("assets").exists());
}

/// Missing template sources surface as a filesystem error
#[test]
fn test_missing_sources_fail() {
    init_test_logging(None);
    let temp = tempfile::TempDir::new().unwrap();

    let output = run_monorepo(temp.path(), &["prepare"]).unwrap();

    assert!(!output.success);
    assert!(!temp.path().join(".prepare-assets.lock").exists());
}
