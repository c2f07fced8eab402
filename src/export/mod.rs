//! Report export
//!
//! This module serializes an [`AnalysisResult`] into a standalone document:
//! plain text, Markdown, pretty JSON, or HTML derived from the Markdown.
//! Export never fails.

mod html;
mod markdown;
mod text;

pub use html::{escape_report, markdown_to_html};
pub use markdown::render_markdown;
pub use text::render_text;

use crate::fetch::UrlValidator;
use crate::report::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder for a missing scalar field
pub(crate) const NOT_FOUND: &str = "Not found";

/// Line used when a page has no OpenGraph data
pub const NO_OPEN_GRAPH: &str = "No OpenGraph data found.";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text (`.txt`)
    Text,
    /// Markdown (`.md`)
    Markdown,
    /// Pretty-printed JSON (`.json`)
    Json,
    /// HTML (`.html`)
    Html,
}

impl ExportFormat {
    /// All formats
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Text,
        ExportFormat::Markdown,
        ExportFormat::Json,
        ExportFormat::Html,
    ];

    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    /// MIME type of the exported document
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Json => "application/json",
            ExportFormat::Html => "text/html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            other => Err(format!(
                "unknown export format '{other}' (expected txt, md, json or html)"
            )),
        }
    }
}

/// A rendered report ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    /// Format of `body`
    pub format: ExportFormat,
    /// `seo-report-<hostname>.<ext>`
    pub filename: String,
    /// MIME type of `body`
    pub mime_type: &'static str,
    /// Document contents
    pub body: String,
}

/// Export functionality
pub struct Exporter;

impl Exporter {
    /// Render `report` as `format`, with filename and MIME type
    pub fn export(report: &AnalysisResult, format: ExportFormat) -> ExportedReport {
        ExportedReport {
            format,
            filename: Self::filename(report, format),
            mime_type: format.mime_type(),
            body: Self::render(report, format),
        }
    }

    /// Render the document body only
    pub fn render(report: &AnalysisResult, format: ExportFormat) -> String {
        match format {
            ExportFormat::Text => render_text(report),
            ExportFormat::Markdown => render_markdown(report),
            ExportFormat::Json => render_json(report),
            ExportFormat::Html => {
                markdown_to_html(&render_markdown(&escape_report(report)), &report.url)
            }
        }
    }

    /// Conventional download name for a report
    pub fn filename(report: &AnalysisResult, format: ExportFormat) -> String {
        let host = UrlValidator::host(&report.url).unwrap_or_else(|| "report".to_string());
        format!("seo-report-{}.{}", host, format.extension())
    }
}

/// Pretty-printed JSON with keys in declaration order
pub fn render_json(report: &AnalysisResult) -> String {
    // Strings, options, vectors and string maps always serialize
    serde_json::to_string_pretty(report).expect("AnalysisResult serializes to JSON")
}

/// `value` unless it is missing or empty
pub(crate) fn or_not_found(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_FOUND)
}
