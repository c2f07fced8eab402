//! Signal extraction module
//!
//! This module turns raw markup into the SEO signals a report needs: title,
//! meta description and keywords, headings, anchors, OpenGraph properties and
//! a cleaned body-text sample.
//!
//! Extraction sits behind the [`MarkupExtractor`] trait. [`PatternExtractor`]
//! is the default: it scans the markup with text patterns and tolerates
//! broken pages at the price of missing malformed tags. [`DomExtractor`] does
//! the same job over a real HTML5 parse tree.

pub mod content;
pub mod dom;
pub mod links;
pub mod metadata;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub use content::{char_prefix, ContentExtractor};
pub use dom::DomExtractor;
pub use links::{AnchorScan, ClassifiedLinks, LinkClassifier, LinkExtractor, LinkRef};
pub use metadata::{Heading, MetadataExtractor};

/// Everything extracted from one page, before classification and assembly.
///
/// Scalar fields hold the raw matched text; trimming is left to the report
/// assembler so the summarizer sees exactly what the page contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedPage {
    /// Inner text of the first `<title>` element
    pub title: Option<String>,
    /// `content` of the first `description` meta tag
    pub meta_description: Option<String>,
    /// `content` of the first `keywords` meta tag
    pub keywords: Option<String>,
    /// Headings in document order
    pub headings: Vec<Heading>,
    /// Retained anchors in document order
    pub anchors: Vec<LinkRef>,
    /// Anchors seen before the discard rules were applied
    pub anchors_scanned: usize,
    /// OpenGraph properties keyed by the part after `og:`
    pub open_graph: BTreeMap<String, String>,
    /// Cleaned body text, untruncated
    pub body_text: String,
}

impl ExtractedPage {
    /// Body text prefix handed to the summarizer
    pub fn summary_content(&self, limit: usize) -> &str {
        char_prefix(&self.body_text, limit)
    }

    /// Body text prefix stored on the report
    pub fn content_sample(&self, limit: usize) -> &str {
        char_prefix(&self.body_text, limit)
    }

    /// Anchors removed by the discard rules
    pub fn anchors_discarded(&self) -> usize {
        self.anchors_scanned.saturating_sub(self.anchors.len())
    }

    /// Heading structure, one `H<level>: <text>` line per heading
    pub fn heading_outline(&self) -> String {
        if self.headings.is_empty() {
            return "No headings found.\n".to_string();
        }
        self.headings
            .iter()
            .map(|h| format!("H{}: {}\n", h.level, h.text))
            .collect()
    }
}

/// A strategy for pulling signals out of markup.
///
/// Implementations must be pure: the same markup always yields the same
/// page, and extraction never fails (missing signals are simply absent).
pub trait MarkupExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extract all signals from `markup`
    fn extract(&self, markup: &str) -> ExtractedPage;
}

/// Text-pattern extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternExtractor;

impl MarkupExtractor for PatternExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    #[instrument(skip_all, fields(bytes = markup.len()))]
    fn extract(&self, markup: &str) -> ExtractedPage {
        let scan = LinkExtractor::scan(markup);

        let page = ExtractedPage {
            title: MetadataExtractor::title(markup),
            meta_description: MetadataExtractor::meta_description(markup),
            keywords: MetadataExtractor::meta_keywords(markup),
            headings: MetadataExtractor::headings(markup),
            anchors: scan.anchors,
            anchors_scanned: scan.scanned,
            open_graph: MetadataExtractor::open_graph(markup),
            body_text: ContentExtractor::body_text(markup),
        };

        debug!(
            "Extracted title={:?}, {} headings, {}/{} anchors kept, {} og properties, {} chars of text",
            page.title,
            page.headings.len(),
            page.anchors.len(),
            page.anchors_scanned,
            page.open_graph.len(),
            page.body_text.chars().count()
        );

        page
    }
}
