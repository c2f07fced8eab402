//! Body text extraction
//!
//! This module isolates the page body, strips tag brackets and normalizes
//! whitespace into the cleaned text used for the summary input and the
//! stored content sample.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Content extraction functionality
pub struct ContentExtractor;

impl ContentExtractor {
    /// Cleaned body text: tags removed, whitespace runs collapsed, trimmed.
    ///
    /// Returns an empty string when the markup has no `<body>...</body>`.
    pub fn body_text(html: &str) -> String {
        match Self::body_inner(html) {
            Some(body) => Self::clean_text(body),
            None => String::new(),
        }
    }

    /// Markup between the first `<body ...>` and the last `</body>`
    pub fn body_inner(html: &str) -> Option<&str> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("body regex is valid")
        });
        re.captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Strip tags, collapse whitespace runs, trim
    pub fn clean_text(html: &str) -> String {
        let stripped = Self::strip_tags(html);
        Self::collapse_whitespace(&stripped).trim().to_string()
    }

    /// Remove every `<...>` sequence
    pub fn strip_tags(html: &str) -> Cow<'_, str> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag regex is valid"));
        re.replace_all(html, "")
    }

    /// Replace runs of two or more whitespace characters with one space.
    ///
    /// A lone newline or tab is left as it is.
    pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace regex is valid"));
        re.replace_all(text, " ")
    }
}

/// The first `max_chars` characters of `text`
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
