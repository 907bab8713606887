// src/extractors/source.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use lopdf::Document;
use scraper::{node::Node, ElementRef, Html};
use std::fs;
use std::path::Path;

// Elements whose text never reaches the output
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "noscript", "template"];

// Elements that end with a paragraph break, so numbered items stay separated
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ol", "ul",
    "table", "tr", "blockquote", "pre", "hr",
];

/// Turns a source document into one blob of text.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Reads the file as UTF-8 text.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

/// Collects the visible text of an HTML page.
#[derive(Debug, Default)]
pub struct HtmlExtractor;

/// Pulls the text layer out of every page of a PDF.
#[derive(Debug, Default)]
pub struct PdfExtractor;

/// Picks an extractor by file extension and returns the text with `\n` line endings.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let extractor: &dyn TextExtractor = match extension.as_str() {
        "pdf" => &PdfExtractor,
        "html" | "htm" | "xhtml" => &HtmlExtractor,
        _ => &PlainTextExtractor,
    };

    tracing::debug!("Extracting {} with {:?} handler", path.display(), extension);
    let text = normalize_line_endings(&extractor.extract(path)?);
    tracing::info!("Extracted {} bytes of text from {}", text.len(), path.display());
    Ok(text)
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = read_source(path)?;
        String::from_utf8(bytes).map_err(|_| ExtractError::Decode(path.to_path_buf()))
    }
}

impl TextExtractor for HtmlExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = read_source(path)?;
        let html = String::from_utf8(bytes).map_err(|_| ExtractError::Decode(path.to_path_buf()))?;
        Ok(html_to_text(&html))
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let pdf_error = |err: lopdf::Error| ExtractError::Pdf {
            path: path.to_path_buf(),
            message: err.to_string(),
        };

        let document = Document::load(path).map_err(pdf_error)?;
        // BTreeMap keys, so pages come out in order
        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        tracing::debug!("PDF {} has {} pages", path.display(), pages.len());

        document.extract_text(&pages).map_err(pdf_error)
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, ExtractError> {
    fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Flattens an HTML document into paragraphs separated by blank lines.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();
    push_element_text(document.root_element(), &mut text);
    text.trim_start().to_string()
}

fn push_element_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }
            if name == "br" {
                trim_inline_end(out);
                out.push('\n');
                continue;
            }
            push_element_text(child_element, out);
            if BLOCK_ELEMENTS.contains(&name) {
                end_block(out);
            }
        } else if let Node::Text(text_node) = child.value() {
            push_collapsed(&text_node.text, out);
        }
    }
}

// HTML whitespace rules: any run of whitespace renders as one space.
fn push_collapsed(text: &str, out: &mut String) {
    for (i, word) in text.split_whitespace().enumerate() {
        let at_line_start = out.is_empty() || out.ends_with('\n');
        let needs_space = i > 0 || text.starts_with(char::is_whitespace);
        if needs_space && !at_line_start && !out.ends_with(' ') {
            out.push(' ');
        }
        out.push_str(word);
    }
    if text.ends_with(char::is_whitespace) && !text.trim().is_empty() {
        out.push(' ');
    }
}

fn trim_inline_end(out: &mut String) {
    let kept = out.trim_end_matches([' ', '\t']).len();
    out.truncate(kept);
}

fn end_block(out: &mut String) {
    trim_inline_end(out);
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}
