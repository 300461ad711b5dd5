//! Readiness probing for prepared assets.

use futures::future::join_all;
use std::path::{Path, PathBuf};

/// Report whether every path in `paths` exists.
///
/// Paths are stat'ed concurrently. A failed stat of any kind counts as
/// "missing" for that path, so this never errors.
pub async fn all_exist(paths: &[PathBuf]) -> bool {
    join_all(paths.iter().map(|path| path_exists(path))).await.into_iter().all(|exists| exists)
}

async fn path_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}
