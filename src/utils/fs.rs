//! File system helpers
//!
//! Small, safe building blocks used by asset preparation and upgrades:
//!
//! - **Atomic writes**: content goes to a temporary sibling first and is
//!   renamed into place, so readers never observe a half-written file
//! - **Non-destructive copies**: template trees can be copied into a directory
//!   that another process is populating at the same time without clobbering
//!   files it already wrote, and without ever exposing a partial file or an
//!   incomplete new directory
//!
//! # Examples
//!
//! ```rust,no_run
//! use monorepo_kit::utils::fs::{atomic_write, copy_tree};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! atomic_write(Path::new("out/AGENTS.md"), b"# Guidelines\n")?;
//! let report = copy_tree(Path::new("templates"), Path::new("assets"), false)?;
//! println!("copied {}, kept {}", report.copied.len(), report.skipped.len());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Create `path` and its parents if missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or `path` exists but
/// is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Write `content` to `path` atomically.
///
/// The data is written and synced to a temporary file in the same directory,
/// then renamed over `path`.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or any of the
/// write, sync or rename steps fail.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_dir(&parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    Ok(())
}

/// Files touched by [`copy_tree`], relative to the destination root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Files written by this copy.
    pub copied: Vec<PathBuf>,
    /// Files left alone because they already existed.
    pub skipped: Vec<PathBuf>,
}

/// Recursively copy the contents of `src` into `dst`.
///
/// Nothing appears half-written at the destination: each file is written to a
/// temporary sibling and renamed into place, and a directory missing from
/// `dst` is assembled in a staging directory and renamed in with its whole
/// subtree. With `overwrite_existing == false` an existing destination file is
/// never replaced, and the rename refuses to clobber one created concurrently
/// by another process. Symlinks and special files are skipped.
///
/// # Errors
///
/// Returns an error if `src` cannot be walked or a file cannot be copied.
pub fn copy_tree(src: &Path, dst: &Path, overwrite_existing: bool) -> Result<CopyReport> {
    ensure_dir(dst)?;
    let mut report = CopyReport::default();
    merge_dir(src, dst, Path::new(""), overwrite_existing, &mut report)?;
    Ok(report)
}

/// Copy the children of `src` into the existing directory `dst`.
fn merge_dir(
    src: &Path,
    dst: &Path,
    relative: &Path,
    overwrite_existing: bool,
    report: &mut CopyReport,
) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let child = relative.join(entry.file_name());
        let target = dst.join(entry.file_name());
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if target.is_dir() {
                merge_dir(entry.path(), &target, &child, overwrite_existing, report)?;
            } else {
                stage_dir(entry.path(), &target, &child, overwrite_existing, report)?;
            }
        } else if file_type.is_file() {
            if copy_file(entry.path(), &target, overwrite_existing)? {
                report.copied.push(child);
            } else {
                report.skipped.push(child);
            }
        }
    }
    Ok(())
}

/// Build `target` (which does not exist yet) next to it and rename it into
/// place, so it appears together with its contents.
fn stage_dir(
    src: &Path,
    target: &Path,
    relative: &Path,
    overwrite_existing: bool,
    report: &mut CopyReport,
) -> Result<()> {
    let parent = target
        .parent()
        .with_context(|| format!("Directory has no parent: {}", target.display()))?;
    let staging = tempfile::Builder::new()
        .prefix(".staging-")
        .tempdir_in(parent)
        .with_context(|| format!("Failed to create staging directory in: {}", parent.display()))?;

    let mut staged = CopyReport::default();
    fill_dir(src, staging.path(), relative, &mut staged)?;

    // After a successful rename the staging path is gone and dropping
    // `staging` has nothing left to remove.
    match fs::rename(staging.path(), target) {
        Ok(()) => {
            report.copied.extend(staged.copied);
            Ok(())
        }
        // Another process moved its copy into place first.
        Err(_) if target.is_dir() => merge_dir(src, target, relative, overwrite_existing, report),
        Err(e) => Err(e)
            .with_context(|| format!("Failed to move directory into place: {}", target.display())),
    }
}

/// Plain recursive copy into a private directory nobody else can see yet.
fn fill_dir(src: &Path, dst: &Path, relative: &Path, report: &mut CopyReport) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let child = entry.path().strip_prefix(src).with_context(|| {
            format!("Walked outside of source tree: {}", entry.path().display())
        })?;
        let target = dst.join(child);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            report.copied.push(relative.join(child));
        }
    }
    Ok(())
}

/// Copy one file; returns `false` when it was kept because it already existed.
fn copy_file(src: &Path, dst: &Path, overwrite_existing: bool) -> Result<bool> {
    let copy_context =
        || format!("Failed to copy file from {} to {}", src.display(), dst.display());

    if !overwrite_existing && dst.exists() {
        return Ok(false);
    }

    let parent = dst.parent().with_context(copy_context)?;
    let mut staged = tempfile::NamedTempFile::new_in(parent).with_context(copy_context)?;
    let mut input = fs::File::open(src).with_context(copy_context)?;
    std::io::copy(&mut input, &mut staged).with_context(copy_context)?;

    let permissions = input.metadata().with_context(copy_context)?.permissions();
    staged.as_file().set_permissions(permissions).with_context(copy_context)?;
    staged.as_file().sync_all().with_context(copy_context)?;

    if overwrite_existing {
        staged.persist(dst).map_err(|e| e.error).with_context(copy_context)?;
        return Ok(true);
    }

    match staged.persist_noclobber(dst) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error).with_context(copy_context),
    }
}
