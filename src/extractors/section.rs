// src/extractors/section.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

// --- Regex Patterns (Lazy Static) ---
// A numbered item: "<n>." plus inline whitespace, the shortest body that ends
// in '.' or '?', then a run of two or more newlines. Dot matches newline, so a
// body may span lines until the first terminator followed by a blank line.
// '~' counts as whitespace: it is what a non-breaking space transliterates to.
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)[1-9][0-9]*\.(?:[^\S\n]|~)+.+?[.?]\n{2,}")
        .expect("Failed to compile SECTION_RE")
});

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("Failed to compile BLANK_LINES_RE"));

static INLINE_WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("Failed to compile INLINE_WHITESPACE_RE"));

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Byte range of the raw match in the normalized text.
    pub span: Range<usize>,
    /// The cleaned section text.
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Segmenter;

impl Segmenter {
    pub fn new() -> Self {
        Self
    }

    /// Splits `text` into numbered sections in document order.
    ///
    /// Text before the first marker, between matches, and after the last one
    /// is discarded. No markers at all is not an error; the result is empty.
    pub fn segment(&self, text: &str) -> Vec<Section> {
        let sections: Vec<Section> = SECTION_RE
            .find_iter(text)
            .map(|m| {
                tracing::trace!("Matched section at {}..{}", m.start(), m.end());
                Section {
                    span: m.range(),
                    text: clean_section(m.as_str()),
                }
            })
            .collect();

        if sections.is_empty() && !text.trim().is_empty() {
            tracing::warn!("No numbered sections found in {} bytes of text", text.len());
        } else {
            tracing::debug!("Segmented {} sections", sections.len());
        }
        sections
    }
}

/// Trims the section and collapses whitespace: blank-line runs become one
/// newline, inline whitespace runs become one space. Idempotent.
pub fn clean_section(raw: &str) -> String {
    let trimmed = raw.trim();
    let lines = BLANK_LINES_RE.replace_all(trimmed, "\n");
    INLINE_WHITESPACE_RE.replace_all(&lines, " ").into_owned()
}
