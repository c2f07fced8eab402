//! Markdown report

use crate::export::{or_not_found, NOT_FOUND, NO_OPEN_GRAPH};
use crate::extraction::LinkRef;
use crate::report::AnalysisResult;

/// Render the Markdown report
pub fn render_markdown(report: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("# SEO Analysis Report\n\n");
    out.push_str(&format!("**URL:** {}\n\n", report.url));

    out.push_str("## AI Summary\n\n");
    out.push_str(&report.ai_summary);
    out.push_str("\n\n");

    out.push_str("## Details\n\n");
    out.push_str(&format!(
        "### Title\n\n{}\n\n",
        or_not_found(report.title.as_deref())
    ));
    out.push_str(&format!(
        "### Meta Description\n\n{}\n\n",
        or_not_found(report.meta_description.as_deref())
    ));
    let keywords = match report.keywords.as_deref().filter(|k| !k.is_empty()) {
        Some(kw) => format!("`{kw}`"),
        None => NOT_FOUND.to_string(),
    };
    out.push_str(&format!("### Keywords\n\n{keywords}\n\n"));

    out.push_str("## Links\n\n");
    push_links(&mut out, "Internal", &report.links.internal);
    push_links(&mut out, "External", &report.links.external);

    out.push_str("## OpenGraph Data\n\n");
    if report.open_graph_data.is_empty() {
        out.push_str(NO_OPEN_GRAPH);
        out.push('\n');
    } else {
        out.push_str("| Property | Value |\n");
        out.push_str("| --- | --- |\n");
        for (key, value) in &report.open_graph_data {
            out.push_str(&format!("| `og:{}` | {} |\n", key, escape_cell(value)));
        }
    }

    out
}

fn push_links(out: &mut String, label: &str, links: &[LinkRef]) {
    out.push_str(&format!("### {label} Links ({})\n\n", links.len()));
    if links.is_empty() {
        out.push_str(&format!("No {} links found.\n", label.to_lowercase()));
    }
    for link in links {
        out.push_str(&format!("- [{}]({})\n", link.text, link.href));
    }
    out.push('\n');
}

// pipes would split the table row
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::LinkSets;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_markdown_report() {
        let report = AnalysisResult {
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            meta_description: Some("A page".to_string()),
            keywords: None,
            links: LinkSets {
                internal: vec![],
                external: vec![LinkRef::new("Other", "https://other.com/x")],
            },
            open_graph_data: [
                ("title".to_string(), "Ex | Home".to_string()),
                ("type".to_string(), "website".to_string()),
            ]
            .into_iter()
            .collect(),
            content_sample: String::new(),
            ai_summary: "Needs work.".to_string(),
        };

        let expected = "\
# SEO Analysis Report

**URL:** https://example.com

## AI Summary

Needs work.

## Details

### Title

Example

### Meta Description

A page

### Keywords

Not found

## Links

### Internal Links (0)

No internal links found.

### External Links (1)

- [Other](https://other.com/x)

## OpenGraph Data

| Property | Value |
| --- | --- |
| `og:title` | Ex \\| Home |
| `og:type` | website |
";
        assert_eq!(render_markdown(&report), expected);
    }

    #[test]
    fn test_keywords_as_inline_code() {
        let report = AnalysisResult {
            keywords: Some("rust, seo".to_string()),
            ..Default::default()
        };
        let md = render_markdown(&report);
        assert!(md.contains("### Keywords\n\n`rust, seo`\n"));
        assert!(md.ends_with("## OpenGraph Data\n\nNo OpenGraph data found.\n"));
    }
}
