//! Regex evaluation for a single rule.
//!
//! All patterns are case-insensitive. Empty or whitespace-only patterns never
//! match, and a pattern that fails to compile is treated as non-matching
//! (logged, never fatal).

use regex::{Regex, RegexBuilder};

use crate::download::Download;
use crate::rules::Rule;

/// Compiles a pattern case-insensitively. Returns `None` for empty or invalid
/// patterns so callers fail closed.
fn compile(pattern: &str) -> Option<Regex> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return None;
    }
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(pattern, %err, "invalid pattern, treated as non-matching");
            None
        }
    }
}

/// Does the rule's URL pattern match the download? Referrer and URL are both
/// tried; either hit counts.
pub fn match_url(rule: &Rule, download: &Download) -> bool {
    match compile(&rule.pattern) {
        Some(re) => re.is_match(&download.referrer) || re.is_match(&download.url),
        None => false,
    }
}

/// Does the rule's file pattern match the bare filename?
pub fn match_file(rule: &Rule, filename: &str) -> bool {
    match compile(&rule.file_pattern) {
        Some(re) => re.is_match(filename),
        None => false,
    }
}

/// Which of referrer/url actually satisfied `pattern`. Referrer is preferred
/// when both match; the URL is the fallback in every other case.
pub fn matched_url<'a>(pattern: &str, download: &'a Download) -> &'a str {
    match compile(pattern) {
        Some(re) if re.is_match(&download.referrer) => &download.referrer,
        _ => &download.url,
    }
}

/// Capture groups 1..N of the first match of `pattern` against `text`.
///
/// Empty when the pattern is empty/invalid, the text is empty, or there is no
/// match. Groups that did not participate in the match come back as `""`.
pub fn extract_groups(pattern: &str, text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let Some(re) = compile(pattern) else {
        return Vec::new();
    };
    match re.captures(text) {
        Some(caps) => caps
            .iter()
            .skip(1)
            .map(|g| g.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    }
}
