//! Splitting markdown into level-2 heading sections.
//!
//! Only `## ` headings are structural. Everything before the first one is the
//! preamble; every heading line starts a section that runs until the next
//! heading or the end of the document. Deeper headings (`###`) and the title
//! (`#`) are ordinary content lines.

use std::borrow::Cow;

/// A heading-keyed block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text without the `##` marker, trimmed and lowercased.
    pub key: String,
    /// Raw lines, starting with the heading line itself.
    pub lines: Vec<String>,
}

/// A document split into preamble and sections, in source order.
///
/// Heading keys are not required to be unique; a document with two identical
/// headings yields two sections with the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMarkdown {
    /// Lines before the first heading.
    pub preamble: Vec<String>,
    /// Sections in document order. Empty when the document has no headings.
    pub sections: Vec<Section>,
}

impl ParsedMarkdown {
    /// Whether the document has any level-2 heading.
    #[must_use]
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// Convert CRLF line endings to LF.
#[must_use]
pub fn normalize_eol(input: &str) -> Cow<'_, str> {
    if input.contains("\r\n") {
        Cow::Owned(input.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// `##` followed by at least one whitespace character.
#[must_use]
pub fn is_h2_heading(line: &str) -> bool {
    line.strip_prefix("##").and_then(|rest| rest.chars().next()).is_some_and(char::is_whitespace)
}

/// Normalized key of a heading line: marker stripped, trimmed, lowercased.
#[must_use]
pub fn heading_key(line: &str) -> String {
    let text = match line.strip_prefix("##") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => line,
    };
    text.trim().to_lowercase()
}

/// Split `content` into preamble and level-2 sections.
#[must_use]
pub fn parse_by_h2(content: &str) -> ParsedMarkdown {
    let normalized = normalize_eol(content);
    let mut parsed = ParsedMarkdown::default();
    let mut current: Option<Section> = None;

    for line in normalized.split('\n') {
        if is_h2_heading(line) {
            parsed.sections.extend(current.take());
            current = Some(Section {
                key: heading_key(line),
                lines: vec![line.to_string()],
            });
        } else if let Some(section) = current.as_mut() {
            section.lines.push(line.to_string());
        } else {
            parsed.preamble.push(line.to_string());
        }
    }

    parsed.sections.extend(current);
    parsed
}

/// Drop whitespace-only lines from both ends.
#[must_use]
pub fn trim_blank_edges<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let is_content = |line: &S| !line.as_ref().trim().is_empty();
    let Some(start) = lines.iter().position(is_content) else {
        return &[];
    };
    let end = lines.iter().rposition(is_content).map_or(start, |last| last + 1);
    &lines[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_detection() {
        assert!(is_h2_heading("## Build"));
        assert!(is_h2_heading("##\tBuild"));
        assert!(is_h2_heading("##  "));
        assert!(!is_h2_heading("##Build"));
        assert!(!is_h2_heading("### Build"));
        assert!(!is_h2_heading("# Build"));
        assert!(!is_h2_heading(" ## Build"));
        assert!(!is_h2_heading("##"));
    }

    #[test]
    fn test_heading_key_normalization() {
        assert_eq!(heading_key("##   Project Structure  "), "project structure");
        assert_eq!(heading_key("## BUILD"), "build");
    }

    #[test]
    fn test_parse_preamble_and_sections() {
        let doc = "# Title\n\nintro\n## One\nbody one\n\n## Two\nbody two\n";
        let parsed = parse_by_h2(doc);

        assert_eq!(parsed.preamble, vec!["# Title", "", "intro"]);
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections[0].key, "one");
        assert_eq!(parsed.sections[0].lines, vec!["## One", "body one", ""]);
        assert_eq!(parsed.sections[1].key, "two");
        assert_eq!(parsed.sections[1].lines, vec!["## Two", "body two", ""]);
    }

    #[test]
    fn test_parse_crlf() {
        let parsed = parse_by_h2("intro\r\n## One\r\nbody\r\n");
        assert_eq!(parsed.preamble, vec!["intro"]);
        assert_eq!(parsed.sections[0].lines, vec!["## One", "body", ""]);
    }

    #[test]
    fn test_parse_without_headings() {
        let parsed = parse_by_h2("a\nb\n### deep\n");
        assert!(!parsed.has_sections());
        assert_eq!(parsed.preamble, vec!["a", "b", "### deep", ""]);
    }

    #[test]
    fn test_parse_keeps_duplicate_keys_and_subheadings() {
        let parsed = parse_by_h2("## A\n### nested\n## a\nsecond\n");
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections[0].key, "a");
        assert_eq!(parsed.sections[0].lines, vec!["## A", "### nested"]);
        assert_eq!(parsed.sections[1].key, "a");
        assert!(parsed.preamble.is_empty());
    }

    #[test]
    fn test_trim_blank_edges() {
        let lines = ["", "  ", "a", "", "b", "\t", ""];
        assert_eq!(trim_blank_edges(&lines), &["a", "", "b"]);
        assert!(trim_blank_edges(&["", " "]).is_empty());
        let empty: [&str; 0] = [];
        assert!(trim_blank_edges(&empty).is_empty());
    }
}
