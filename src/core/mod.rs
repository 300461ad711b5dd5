//! Core types shared across the toolkit
//!
//! Currently this is the error model: typed errors for the failure cases the
//! toolkit knows about, and the [`ErrorContext`] wrapper the CLI uses to render
//! them with suggestions.

pub mod error;

pub use error::{ErrorContext, MonorepoError, PreparationFailed, user_friendly_error};
