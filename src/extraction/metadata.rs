//! Page metadata extraction
//!
//! This module pulls the title, meta description and keywords, headings and
//! OpenGraph properties out of raw markup with case-insensitive text patterns.
//! Values are returned verbatim: no entity decoding, no trimming.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A heading element and its level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// 1 through 6
    pub level: u8,
    /// Trimmed inner text
    pub text: String,
}

/// Metadata extraction functionality
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Inner text of the first `<title>` element
    pub fn title(html: &str) -> Option<String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(?i)<title>([^<]*)</title>").expect("title regex is valid")
        });
        first_capture(re, html)
    }

    /// `content` of the first `<meta name="description">`
    pub fn meta_description(html: &str) -> Option<String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| named_meta_regex("description"));
        first_capture(re, html)
    }

    /// `content` of the first `<meta name="keywords">`
    pub fn meta_keywords(html: &str) -> Option<String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| named_meta_regex("keywords"));
        first_capture(re, html)
    }

    /// Every `<hN>` element closed by a `</hN>` of the same level.
    ///
    /// Headings whose text contains nested tags, or whose closing tag has a
    /// different level, are skipped.
    pub fn headings(html: &str) -> Vec<Heading> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"(?i)<h([1-6])[^>]*>([^<]*)</h([1-6])>").expect("heading regex is valid")
        });

        re.captures_iter(html)
            .filter(|caps| caps[1] == caps[3])
            .filter_map(|caps| {
                let level = caps[1].parse::<u8>().ok()?;
                Some(Heading {
                    level,
                    text: caps[2].trim().to_string(),
                })
            })
            .collect()
    }

    /// All `og:*` properties; a repeated property keeps its last value
    pub fn open_graph(html: &str) -> BTreeMap<String, String> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(
                r#"(?i)<meta[^>]*property=["']og:([^"']+)["'][^>]*content=["']([^"']*)["']"#,
            )
            .expect("og regex is valid")
        });

        let mut data = BTreeMap::new();
        for caps in re.captures_iter(html) {
            data.insert(caps[1].to_string(), caps[2].to_string());
        }
        data
    }
}

fn named_meta_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)<meta[^>]*name=["']{name}["'][^>]*content=["']([^"']*)["']"#
    ))
    .expect("meta regex is valid")
}

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
