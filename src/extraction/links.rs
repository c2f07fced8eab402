//! Link extraction and classification
//!
//! This module scans anchors out of raw markup, drops the ones that are not
//! navigable links, and partitions the rest into internal and external sets
//! relative to the analyzed page.

use crate::extraction::content::ContentExtractor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

/// A retained anchor: visible text plus the href exactly as written
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkRef {
    /// Tag-stripped, trimmed inner text
    pub text: String,
    /// Original (possibly relative) href attribute
    pub href: String,
}

impl LinkRef {
    /// Create a link reference
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Result of scanning markup for anchors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorScan {
    /// Anchors that passed the discard rules, in document order
    pub anchors: Vec<LinkRef>,
    /// Every anchor matched, kept or not
    pub scanned: usize,
}

/// Link extraction functionality
pub struct LinkExtractor;

impl LinkExtractor {
    /// Scan every `<a ... href="...">...</a>` in document order.
    ///
    /// `href` must be a whole attribute name, so `data-href` and the like
    /// are skipped over. Anchors with an empty href, a `javascript:` or
    /// `mailto:` href, or no visible text are discarded.
    pub fn scan(html: &str) -> AnchorScan {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(
                r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)')[^>]*>(.*?)</a>"#,
            )
            .expect("anchor regex is valid")
        });

        let mut scan = AnchorScan::default();
        for caps in re.captures_iter(html) {
            scan.scanned += 1;
            let href = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            let text = ContentExtractor::strip_tags(&caps[3]).trim().to_string();
            if Self::is_retained(href, &text) {
                scan.anchors.push(LinkRef::new(text, href));
            }
        }

        debug!("Scanned {} anchors, kept {}", scan.scanned, scan.anchors.len());
        scan
    }

    /// Whether an anchor with this href and visible text is kept
    pub fn is_retained(href: &str, text: &str) -> bool {
        let target = href.trim_start();
        if target.is_empty() || text.trim().is_empty() {
            return false;
        }
        !(starts_with_ignore_case(target, "javascript:") || starts_with_ignore_case(target, "mailto:"))
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Anchors partitioned by origin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    /// Same hostname as the page
    pub internal: Vec<LinkRef>,
    /// Any other hostname
    pub external: Vec<LinkRef>,
    /// Anchors whose href could not be resolved
    pub dropped: usize,
}

impl ClassifiedLinks {
    /// Anchors that made it into either partition
    pub fn total(&self) -> usize {
        self.internal.len() + self.external.len()
    }
}

/// Classifies anchors as internal or external to a page
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    base: Url,
}

impl LinkClassifier {
    /// Classifier for links found on `base`
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Resolve an href against the page URL
    pub fn resolve(&self, href: &str) -> Option<Url> {
        self.base.join(href).ok()
    }

    /// Partition anchors by hostname, keeping document order.
    ///
    /// Hostnames are compared exactly as the URL parser produces them:
    /// scheme and port are ignored, `www.` is significant. Unresolvable
    /// hrefs are dropped without error.
    pub fn classify(&self, anchors: &[LinkRef]) -> ClassifiedLinks {
        let page_host = self.base.host_str();
        let mut links = ClassifiedLinks::default();

        for anchor in anchors {
            match self.resolve(&anchor.href) {
                Some(resolved) if resolved.host_str() == page_host => {
                    links.internal.push(anchor.clone());
                }
                Some(_) => links.external.push(anchor.clone()),
                None => {
                    debug!("Dropping unresolvable link: {}", anchor.href);
                    links.dropped += 1;
                }
            }
        }

        links
    }
}
