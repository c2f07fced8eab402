//! HTML report
//!
//! The HTML export is a literal rewrite of the Markdown export, not a
//! Markdown renderer. Four passes run in a fixed order: heading markers,
//! bold markers, inline-code markers, then newlines to `<br>`.

use crate::extraction::LinkRef;
use crate::fetch::UrlValidator;
use crate::report::AnalysisResult;
use htmlescape::encode_minimal;
use regex::Regex;
use std::sync::OnceLock;

struct Passes {
    h3: Regex,
    h2: Regex,
    h1: Regex,
    bold: Regex,
    code: Regex,
}

fn passes() -> &'static Passes {
    static PASSES: OnceLock<Passes> = OnceLock::new();
    PASSES.get_or_init(|| Passes {
        h3: Regex::new(r"(?m)^### (.*)$").expect("h3 regex is valid"),
        h2: Regex::new(r"(?m)^## (.*)$").expect("h2 regex is valid"),
        h1: Regex::new(r"(?m)^# (.*)$").expect("h1 regex is valid"),
        bold: Regex::new(r"\*\*(.+?)\*\*").expect("bold regex is valid"),
        code: Regex::new(r"`([^`]+)`").expect("code regex is valid"),
    })
}

/// Copy of `report` with every page-derived string HTML-escaped.
///
/// The Markdown passes copy text into the document verbatim, so values
/// taken from the page must be escaped before the Markdown is rendered.
pub fn escape_report(report: &AnalysisResult) -> AnalysisResult {
    let escape_opt = |value: &Option<String>| value.as_deref().map(encode_minimal);
    let escape_links = |links: &[LinkRef]| {
        links
            .iter()
            .map(|link| LinkRef::new(encode_minimal(&link.text), encode_minimal(&link.href)))
            .collect()
    };

    let mut escaped = report.clone();
    escaped.url = encode_minimal(&report.url);
    escaped.title = escape_opt(&report.title);
    escaped.meta_description = escape_opt(&report.meta_description);
    escaped.keywords = escape_opt(&report.keywords);
    escaped.links.internal = escape_links(&report.links.internal);
    escaped.links.external = escape_links(&report.links.external);
    escaped.open_graph_data = report
        .open_graph_data
        .iter()
        .map(|(k, v)| (encode_minimal(k), encode_minimal(v)))
        .collect();
    escaped.content_sample = encode_minimal(&report.content_sample);
    escaped.ai_summary = encode_minimal(&report.ai_summary);
    escaped
}

/// Convert the Markdown report into a complete HTML document.
///
/// The Markdown is inserted as-is; render it from [`escape_report`] output
/// when it carries page content.
pub fn markdown_to_html(markdown: &str, url: &str) -> String {
    let p = passes();

    let body = p.h3.replace_all(markdown, "<h3>${1}</h3>");
    let body = p.h2.replace_all(&body, "<h2>${1}</h2>");
    let body = p.h1.replace_all(&body, "<h1>${1}</h1>");
    let body = p.bold.replace_all(&body, "<strong>${1}</strong>");
    let body = p.code.replace_all(&body, "<code>${1}</code>");
    let body = body.replace('\n', "<br>");

    let host = UrlValidator::host(url).unwrap_or_else(|| url.to_string());

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>SEO Report for {host}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
