//! Markup cell cleaning.
//!
//! Each cell passes through a fixed sequence of substitutions; the order is
//! load-bearing (tags are stripped before links collapse, the numeric
//! `{{nts}}`/`{{ntsh}}` wrappers are unwrapped before the catch-all template
//! drop). The distance column has its own extraction priority: free text
//! containing a number wins over the template argument, and the template
//! fallback re-scans the original uncleaned cell.

use crate::models::ColumnRole;
use once_cell::sync::Lazy;
use regex::Regex;

/// Literal wiki marker for "no data, render an em-dash".
const EMPTY_SENTINEL: &str = "{{sort|z|–}}";

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static SORT_DISPLAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{sort\|[^}]+\|([^}]+)\}\}").unwrap());

static NTSH_UNWRAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{ntsh\|([^}]+)\}\}").unwrap());

static NTS_UNWRAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{nts\|([^}]+)\}\}").unwrap());

static TEMPLATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());

static WIKI_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^\]|]+\|)?([^\]]+)\]\]").unwrap());

static SUPERSCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<sup>([^<]+)</sup>").unwrap());

static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"''([^']+)''").unwrap());

static ROW_SCOPE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"! scope="row"\s*\|"#).unwrap());

static NTS_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(?:ntsh|nts)\|[^}]+\}\}").unwrap());

static NTS_CAPTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(?:ntsh|nts)\|([^}]+)\}\}").unwrap());

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.?\d*(?:\s*[-–]\s*\d+\.?\d*)?").unwrap());

/// Routes a cell to the cleaner matching its column role.
pub fn clean(text: &str, role: ColumnRole) -> String {
    match role {
        ColumnRole::Generic => clean_generic(text),
        ColumnRole::Distance => clean_distance(text),
    }
}

/// Strips wiki and HTML formatting from a generic cell.
pub fn clean_generic(text: &str) -> String {
    if text == EMPTY_SENTINEL {
        return String::new();
    }
    let text = HTML_TAG.replace_all(text, "");
    let text = SORT_DISPLAY.replace_all(&text, "$1");
    let text = NTSH_UNWRAP.replace_all(&text, "$1");
    let text = NTS_UNWRAP.replace_all(&text, "$1");
    let text = TEMPLATE.replace_all(&text, "");
    let text = WIKI_LINK.replace_all(&text, "$2");
    let text = SUPERSCRIPT.replace_all(&text, "$1");
    let text = text.replace("&nbsp;", " ");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = ROW_SCOPE.replace_all(&text, "");
    text.trim().to_string()
}

/// Extracts the distance value from a cell.
///
/// Free text containing a number takes priority; failing that, the first
/// `{{nts}}`/`{{ntsh}}` argument in the original cell text is used verbatim.
pub fn clean_distance(text: &str) -> String {
    let stripped = NTS_ANY.replace_all(text, "");
    let trimmed = stripped.trim();
    if !trimmed.is_empty() && NUMBER.is_match(trimmed) {
        return trimmed.to_string();
    }
    if let Some(caps) = NTS_CAPTURE.captures(text) {
        return caps[1].to_string();
    }
    String::new()
}
