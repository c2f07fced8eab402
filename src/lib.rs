//! SEO Pulse - single-page SEO analysis
//!
//! This crate fetches one public web page, pulls SEO signals out of its raw
//! markup, classifies its outbound links, has a summarizer write a short
//! narrative, and exports the resulting report as text, Markdown, JSON or
//! HTML.
//!
//! # Architecture
//!
//! ```text
//!  URL ──▶ PageFetcher ──▶ MarkupExtractor ──▶ LinkClassifier
//!                                 │                  │
//!                                 ▼                  ▼
//!                  Summarizer ──▶ ReportAssembler ──▶ AnalysisResult ──▶ Exporter
//! ```
//!
//! The fetcher and summarizer are capabilities behind traits, so the whole
//! pipeline can run against deterministic substitutes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use seo_pulse::config::{AnalyzerConfig, SummarizerConfig};
//! use seo_pulse::export::{ExportFormat, Exporter};
//! use seo_pulse::Analyzer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = Analyzer::from_config(&AnalyzerConfig::default(), &SummarizerConfig::from_env())?;
//!     let report = analyzer.analyze("https://example.com").await?;
//!
//!     let exported = Exporter::export(&report, ExportFormat::Markdown);
//!     println!("{}", exported.body);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod fetch;
pub mod metrics;
pub mod report;
pub mod summary;

// Re-exports for convenience
pub use analyzer::{analyze_url, Analyzer};
pub use error::{Error, ErrorKind, Result};
pub use export::{ExportFormat, ExportedReport, Exporter};
pub use extraction::{DomExtractor, ExtractedPage, LinkClassifier, LinkRef, MarkupExtractor, PatternExtractor};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use report::{AnalysisResult, LinkSets, OpenGraphPreview, ReportAssembler};
pub use summary::{OpenAiSummarizer, Summarizer, SummaryInput, SummaryOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
