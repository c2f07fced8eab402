//! Report assembly
//!
//! This module defines [`AnalysisResult`], the immutable record produced for
//! one analyzed URL, and [`ReportAssembler`], which builds it from extraction
//! output, classified links and the summarizer's answer.

mod preview;

pub use preview::OpenGraphPreview;

use crate::extraction::{ClassifiedLinks, ExtractedPage, LinkRef};
use crate::summary::{SummaryInput, SummaryOutput};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Links split by origin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSets {
    /// Same-host links in document order
    pub internal: Vec<LinkRef>,
    /// Other-host links in document order
    pub external: Vec<LinkRef>,
}

impl From<ClassifiedLinks> for LinkSets {
    fn from(links: ClassifiedLinks) -> Self {
        Self {
            internal: links.internal,
            external: links.external,
        }
    }
}

/// The assembled SEO report for one URL.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Analyzed URL as requested
    pub url: String,
    /// Trimmed page title
    pub title: Option<String>,
    /// Trimmed meta description
    pub meta_description: Option<String>,
    /// Trimmed meta keywords
    pub keywords: Option<String>,
    /// Classified links
    pub links: LinkSets,
    /// OpenGraph properties without the `og:` prefix
    pub open_graph_data: BTreeMap<String, String>,
    /// First characters of the cleaned body text
    pub content_sample: String,
    /// Narrative summary from the summarizer
    pub ai_summary: String,
}

impl AnalysisResult {
    /// Individual keywords: split on commas, trimmed, empties dropped
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .as_deref()
            .map(|kw| {
                kw.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of classified links
    pub fn link_count(&self) -> usize {
        self.links.internal.len() + self.links.external.len()
    }
}

/// Builds summary requests and final reports
#[derive(Debug, Clone, Copy)]
pub struct ReportAssembler {
    summary_content_limit: usize,
    sample_limit: usize,
}

impl ReportAssembler {
    /// Assembler with the given text limits (in characters)
    pub fn new(summary_content_limit: usize, sample_limit: usize) -> Self {
        Self {
            summary_content_limit,
            sample_limit,
        }
    }

    /// Summarizer input for a page.
    ///
    /// Scalars are passed untrimmed, missing ones as empty strings.
    pub fn summary_input(&self, url: &str, page: &ExtractedPage) -> SummaryInput {
        SummaryInput {
            url: url.to_string(),
            title: page.title.clone().unwrap_or_default(),
            meta_description: page.meta_description.clone().unwrap_or_default(),
            keywords: page.keywords.clone().unwrap_or_default(),
            content: page.summary_content(self.summary_content_limit).to_string(),
        }
    }

    /// Merge everything into the final record
    pub fn assemble(
        &self,
        url: &str,
        page: &ExtractedPage,
        links: ClassifiedLinks,
        summary: SummaryOutput,
    ) -> AnalysisResult {
        AnalysisResult {
            url: url.to_string(),
            title: trimmed(page.title.as_deref()),
            meta_description: trimmed(page.meta_description.as_deref()),
            keywords: trimmed(page.keywords.as_deref()),
            links: links.into(),
            open_graph_data: page.open_graph.clone(),
            content_sample: page.content_sample(self.sample_limit).to_string(),
            ai_summary: summary.summary,
        }
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_SUMMARY_CONTENT_LIMIT,
            crate::config::DEFAULT_SAMPLE_LIMIT,
        )
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}
