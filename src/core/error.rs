//! Error handling for monorepo-kit
//!
//! This module provides the error types and user-friendly error reporting for the
//! toolkit. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`MonorepoError`] - Enumerated error types for the failure cases of the toolkit
//! - [`PreparationFailed`] - A failure shared by every caller waiting on one
//!   asset preparation attempt
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Use [`user_friendly_error`] to convert any error into a user-friendly format with
//! contextual suggestions.
//!
//! # Examples
//!
//! ```rust,no_run
//! use monorepo_kit::core::{MonorepoError, ErrorContext};
//!
//! let error = MonorepoError::LockContention {
//!     lock_path: "/work/pkg/.prepare-assets.lock".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Remove the lock file if no other install is running");
//!
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Enumerated failure cases of the toolkit.
#[derive(Error, Debug)]
pub enum MonorepoError {
    /// The preparation lock stayed held through the whole wait window and the
    /// retry acquisition found it held again.
    #[error("Failed to prepare template assets: lock is held at {lock_path}")]
    LockContention {
        /// Path of the lock file that could not be claimed
        lock_path: String,
    },

    /// File system error
    #[error("File system error: {operation} ({path})")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation} ({path})")]
    PermissionDenied {
        /// The operation that was denied due to insufficient permissions
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A markdown document required by an operation does not exist
    #[error("Markdown document not found: {path}")]
    MarkdownNotFound {
        /// Path of the missing document
        path: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for MonorepoError {
    fn clone(&self) -> Self {
        match self {
            Self::LockContention {
                lock_path,
            } => Self::LockContention {
                lock_path: lock_path.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::MarkdownNotFound {
                path,
            } => Self::MarkdownNotFound {
                path: path.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Outcome of a failed preparation attempt, shared by every caller that was
/// waiting on that attempt.
///
/// All waiters receive a clone of the same `Arc`, so `Arc::ptr_eq` holds between
/// the failures observed by concurrent callers.
#[derive(Error, Debug, Clone)]
#[error("{0:#}")]
pub struct PreparationFailed(pub Arc<anyhow::Error>);

impl PreparationFailed {
    /// The underlying typed error, if the failure originated from one.
    #[must_use]
    pub fn kind(&self) -> Option<&MonorepoError> {
        self.0.chain().find_map(|cause| cause.downcast_ref::<MonorepoError>())
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: MonorepoError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: MonorepoError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions where the cause
/// is recognised.
///
/// The whole error chain is searched, so typed errors wrapped in `anyhow`
/// context or delivered through [`PreparationFailed`] are still recognised.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(typed) = find_typed_error(&error) {
        return create_error_context(typed.clone());
    }

    if let Some(io_error) = find_io_error(&error) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(MonorepoError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check ownership of the package and assets directories")
                .with_details(format!("{error:#}"));
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(MonorepoError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(format!("{error:#}"));
            }
            _ => {}
        }
    }

    ErrorContext::new(MonorepoError::Other {
        message: format!("{error:#}"),
    })
}

fn find_typed_error(error: &anyhow::Error) -> Option<&MonorepoError> {
    error.chain().find_map(|cause| {
        cause
            .downcast_ref::<MonorepoError>()
            .or_else(|| cause.downcast_ref::<PreparationFailed>().and_then(PreparationFailed::kind))
    })
}

fn find_io_error(error: &anyhow::Error) -> Option<&std::io::Error> {
    error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>())
}

fn create_error_context(error: MonorepoError) -> ErrorContext {
    match &error {
        MonorepoError::LockContention {
            lock_path,
        } => ErrorContext::new(error.clone())
            .with_details(
                "Another process held the preparation lock for the whole wait window, \
                 and it was still held on the final attempt",
            )
            .with_suggestion(format!(
                "If no other install is running, delete the stale lock file: {lock_path}"
            )),
        MonorepoError::PermissionDenied {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check ownership of the package and assets directories"),
        MonorepoError::ConfigError {
            ..
        }
        | MonorepoError::TomlError(_) => ErrorContext::new(error.clone())
            .with_suggestion("Check the syntax of monorepo.toml"),
        MonorepoError::MarkdownNotFound {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Run `monorepo prepare` to populate the template assets"),
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_lock_contention_message_names_path() {
        let error = MonorepoError::LockContention {
            lock_path: "/tmp/pkg/.prepare-assets.lock".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to prepare template assets: lock is held at /tmp/pkg/.prepare-assets.lock"
        );
    }

    #[test]
    fn test_clone_toml_error_becomes_other() {
        let toml_error = toml::from_str::<toml::Table>("[lock\n").unwrap_err();
        let error = MonorepoError::from(toml_error);
        match error.clone() {
            MonorepoError::Other {
                message,
            } => assert!(message.starts_with("TOML parsing error")),
            other => panic!("unexpected clone: {other:?}"),
        }
    }

    #[test]
    fn test_user_friendly_error_finds_typed_error_through_context() {
        let error = anyhow::Error::new(MonorepoError::LockContention {
            lock_path: "x.lock".to_string(),
        })
        .context("while preparing assets");

        let ctx = user_friendly_error(error);
        assert!(matches!(ctx.error, MonorepoError::LockContention { .. }));
        assert!(ctx.suggestion.unwrap().contains("x.lock"));
    }

    #[test]
    fn test_user_friendly_error_unwraps_shared_failure() {
        let inner = anyhow::Error::new(MonorepoError::LockContention {
            lock_path: "y.lock".to_string(),
        });
        let shared = PreparationFailed(Arc::new(inner));
        let ctx = user_friendly_error(anyhow::Error::new(shared));
        assert!(matches!(ctx.error, MonorepoError::LockContention { .. }));
    }

    #[test]
    fn test_user_friendly_error_permission_denied() {
        let result: anyhow::Result<()> =
            Err::<(), _>(std::io::Error::from(std::io::ErrorKind::PermissionDenied))
                .context("Failed to create lock file");
        let ctx = user_friendly_error(result.unwrap_err());
        assert!(matches!(ctx.error, MonorepoError::PermissionDenied { .. }));
    }

    #[test]
    fn test_error_context_display_includes_suggestion() {
        let ctx = ErrorContext::new(MonorepoError::ConfigError {
            message: "bad".to_string(),
        })
        .with_details("details here")
        .with_suggestion("fix it");
        let rendered = ctx.to_string();
        assert!(rendered.contains("Configuration error: bad"));
        assert!(rendered.contains("Details: details here"));
        assert!(rendered.contains("Suggestion: fix it"));
    }
}
