//! Plain-text report

use crate::export::{or_not_found, NO_OPEN_GRAPH};
use crate::extraction::LinkRef;
use crate::report::AnalysisResult;

/// Render the plain-text report.
///
/// Sections, in order: URL, AI summary, details, links, OpenGraph.
pub fn render_text(report: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("SEO Analysis Report for: {}\n\n", report.url));

    out.push_str("--- AI Summary ---\n");
    out.push_str(&report.ai_summary);
    out.push_str("\n\n");

    out.push_str("--- Details ---\n");
    out.push_str(&format!("Title: {}\n", or_not_found(report.title.as_deref())));
    out.push_str(&format!(
        "Meta Description: {}\n",
        or_not_found(report.meta_description.as_deref())
    ));
    out.push_str(&format!(
        "Keywords: {}\n\n",
        or_not_found(report.keywords.as_deref())
    ));

    out.push_str("--- Links ---\n");
    push_links(&mut out, "Internal", &report.links.internal);
    out.push('\n');
    push_links(&mut out, "External", &report.links.external);
    out.push('\n');

    out.push_str("--- OpenGraph Data ---\n");
    if report.open_graph_data.is_empty() {
        out.push_str(NO_OPEN_GRAPH);
        out.push('\n');
    } else {
        for (key, value) in &report.open_graph_data {
            out.push_str(&format!("og:{key}: {value}\n"));
        }
    }

    out
}

fn push_links(out: &mut String, label: &str, links: &[LinkRef]) {
    out.push_str(&format!("{label} Links ({}):\n", links.len()));
    for link in links {
        out.push_str(&format!("- {} ({})\n", link.text, link.href));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LinkSets;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_text_report() {
        let report = AnalysisResult {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            meta_description: None,
            keywords: Some("a, b".to_string()),
            links: LinkSets {
                internal: vec![LinkRef::new("About", "/about")],
                external: vec![],
            },
            open_graph_data: [("title".to_string(), "Ex".to_string())].into_iter().collect(),
            content_sample: "ignored".to_string(),
            ai_summary: "Solid basics.".to_string(),
        };

        let expected = "\
SEO Analysis Report for: https://example.com

--- AI Summary ---
Solid basics.

--- Details ---
Title: Example
Meta Description: Not found
Keywords: a, b

--- Links ---
Internal Links (1):
- About (/about)

External Links (0):

--- OpenGraph Data ---
og:title: Ex
";
        assert_eq!(render_text(&report), expected);
    }

    #[test]
    fn test_no_open_graph_line() {
        let text = render_text(&AnalysisResult::default());
        assert!(text.lines().any(|l| l == "No OpenGraph data found."));
    }
}
