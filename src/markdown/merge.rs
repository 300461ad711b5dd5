//! Merging a generated AGENTS.md template into a customized one.
//!
//! The merge never loses user content. For documents with `##` sections:
//!
//! - sections follow the template's order
//! - a section present in both keeps the user's (target) body
//! - a section only in the template is added with the template's body
//! - a section only in the user's document is kept and appended at the end
//! - the user's preamble wins when it has one
//!
//! When either side has no `##` headings there is no structure to align, and
//! the merge degrades to a line union (see [`merge_plain_text`]).

use super::sections::{ParsedMarkdown, Section, normalize_eol, parse_by_h2, trim_blank_edges};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Merge the template document `source` into the user's document `target`.
///
/// The result is blocks separated by one blank line, ending in exactly one
/// newline. Never fails: text without headings is handled by the plain-text
/// fallback.
///
/// # Examples
///
/// ```rust
/// use monorepo_kit::markdown::merge_agents_markdown;
///
/// let source = "## Build\n\nnpm run build\n\n## Testing\n\nnpm test\n";
/// let target = "## Build\n\npnpm build\n";
///
/// assert_eq!(
///     merge_agents_markdown(source, target),
///     "## Build\n\npnpm build\n\n## Testing\n\nnpm test\n"
/// );
/// ```
#[must_use]
pub fn merge_agents_markdown(source: &str, target: &str) -> String {
    let source_parsed = parse_by_h2(source);
    let target_parsed = parse_by_h2(target);

    if !source_parsed.has_sections() || !target_parsed.has_sections() {
        debug!("Document without ## headings, falling back to line merge");
        return merge_plain_text(source, target);
    }

    let merged = merge_sections(&source_parsed, &target_parsed);

    // A preamble made only of blank lines still counts as "present" here and
    // then trims away to nothing.
    let preamble = if target_parsed.preamble.is_empty() {
        &source_parsed.preamble
    } else {
        &target_parsed.preamble
    };

    let mut blocks = Vec::with_capacity(merged.len() + 1);
    blocks.push(trim_blank_edges(preamble).join("\n"));
    blocks.extend(merged.iter().map(|section| trim_blank_edges(&section.lines).join("\n")));
    blocks.retain(|block| !block.is_empty());

    format!("{}\n", blocks.join("\n\n"))
}

/// Source-ordered sections, target bodies preferred, then target-only sections.
fn merge_sections<'a>(source: &'a ParsedMarkdown, target: &'a ParsedMarkdown) -> Vec<&'a Section> {
    let source_keys: HashSet<&str> = source.sections.iter().map(|s| s.key.as_str()).collect();
    // Later duplicates overwrite earlier ones.
    let target_by_key: HashMap<&str, &Section> =
        target.sections.iter().map(|s| (s.key.as_str(), s)).collect();

    let mut merged: Vec<&Section> = source
        .sections
        .iter()
        .map(|section| target_by_key.get(section.key.as_str()).copied().unwrap_or(section))
        .collect();
    merged.extend(target.sections.iter().filter(|s| !source_keys.contains(s.key.as_str())));
    merged
}

/// Line-union merge for documents without heading structure.
///
/// Starts from the target's lines (blank edges trimmed) and appends, in source
/// order, every non-blank source line not already present. Blank source lines
/// are never appended.
#[must_use]
pub fn merge_plain_text(source: &str, target: &str) -> String {
    let source = normalize_eol(source);
    let target = normalize_eol(target);
    let source_lines: Vec<&str> = source.split('\n').collect();
    let target_lines: Vec<&str> = target.split('\n').collect();

    let mut result: Vec<&str> = trim_blank_edges(&target_lines).to_vec();
    let mut seen: HashSet<&str> = result.iter().copied().collect();

    for &line in trim_blank_edges(&source_lines) {
        if line.trim().is_empty() {
            continue;
        }
        if seen.insert(line) {
            result.push(line);
        }
    }

    format!("{}\n", result.join("\n"))
}
