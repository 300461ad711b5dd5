//! Utilities and helpers
//!
//! - [`fs`] - File system operations with atomic writes and non-destructive copying

pub mod fs;

pub use fs::{CopyReport, atomic_write, copy_tree, ensure_dir};
