//! Structural markdown handling for agent instruction documents.
//!
//! AGENTS.md files are generated from a template and then customized by the
//! people working in the repository. When the template changes, the two have
//! to be reconciled without throwing away the customizations. This module
//! understands exactly as much markdown as that needs: a preamble followed by
//! `## ` sections.
//!
//! - [`sections`] - splitting a document into preamble and heading-keyed sections
//! - [`merge`] - the section merge and its plain-text fallback

pub mod merge;
pub mod sections;

pub use merge::{merge_agents_markdown, merge_plain_text};
pub use sections::{ParsedMarkdown, Section, parse_by_h2};
