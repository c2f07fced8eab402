//! Narrative summary capability
//!
//! The pipeline hands a few structured page facts to a [`Summarizer`] and
//! stores the prose it returns. How the prose is produced is up to the
//! implementation; [`OpenAiSummarizer`] asks an OpenAI-compatible chat API.

mod openai;

pub use openai::OpenAiSummarizer;

use crate::error::SummarizationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Facts sent to the summarizer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInput {
    /// Analyzed URL
    pub url: String,
    /// Raw page title, empty when absent
    pub title: String,
    /// Raw meta description, empty when absent
    pub meta_description: String,
    /// Raw meta keywords, empty when absent
    pub keywords: String,
    /// Cleaned body text prefix
    pub content: String,
}

/// Summarizer answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// Narrative SEO summary
    pub summary: String,
}

/// Capability: turn page facts into a narrative summary
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a summary for `input`
    async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutput, SummarizationError>;
}
