//! HTML to Markdown conversion with ATX headings.

use crate::html::StrippedDocument;
use regex::Regex;
use std::sync::LazyLock;

/// Three or more newlines, possibly with whitespace between them.
static BLANK_RUNS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

pub fn html_to_markdown(document: &StrippedDocument) -> String {
    let md = html2md::parse_html(&document.html());
    clean_markdown(&md)
}

/// Collapse runs of blank lines into one and trim the block.
pub fn clean_markdown(md: &str) -> String {
    BLANK_RUNS_RE.replace_all(md, "\n\n").trim().to_string()
}
