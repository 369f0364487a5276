//! Row extraction from wiki table markup.
//!
//! A row starts after a `|-` separator line and runs to the newline preceding
//! the next `|-` separator or the `|}` table terminator. Cells within a row
//! are separated by a newline-pipe pair.

use once_cell::sync::Lazy;
use regex::Regex;

static ROW_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|-[^|\n]*\n").unwrap());

static ROW_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(?:\|-|\|\})").unwrap());

static FILE_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[File:(.*?)\|").unwrap());

/// Returns the raw content span of every row in the document, in order.
/// A trailing row with no separator or terminator after it is dropped.
pub fn row_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut pos = 0;
    while let Some(sep) = ROW_SEPARATOR.find_at(text, pos) {
        let start = sep.end();
        match ROW_BOUNDARY.find(&text[start..]) {
            Some(boundary) => {
                blocks.push(&text[start..start + boundary.start()]);
                pos = start + boundary.start() + 1;
            }
            None => break,
        }
    }
    blocks
}

/// Splits a row block into its ordered cell strings.
pub fn split_cells(block: &str) -> Vec<&str> {
    block.split("\n|").collect()
}

/// Trims cell delimiters and drops a leading inline `style="…"` attribute
/// up to and including its closing pipe.
pub fn normalize_cell(raw: &str) -> &str {
    let cell = raw.trim_matches(|c: char| c == '|' || c == ' ');
    if cell.starts_with("style=\"") {
        match cell.find('|') {
            Some(i) => cell[i + 1..].trim(),
            None => cell,
        }
    } else {
        cell
    }
}

/// First `[[File:…|` reference within a row's raw text, if any.
pub fn file_reference(block: &str) -> Option<&str> {
    FILE_REFERENCE
        .captures(block)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
}
