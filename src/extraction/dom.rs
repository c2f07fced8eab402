//! Parser-backed extraction
//!
//! [`DomExtractor`] builds a real HTML5 tree with `scraper` and reads the same
//! signals as the pattern extractor from it. It recovers from markup the
//! patterns miss (nested tags in headings, attribute order in meta tags) but
//! keeps the same functional rules: anchor discard rules, last-write-wins
//! OpenGraph, and empty text for pages without a `<body>` tag.

use crate::extraction::content::ContentExtractor;
use crate::extraction::links::{LinkExtractor, LinkRef};
use crate::extraction::metadata::Heading;
use crate::extraction::{ExtractedPage, MarkupExtractor};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, instrument};

/// HTML5-parser extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct DomExtractor;

macro_rules! selector {
    ($css:expr) => {{
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse($css).expect("static selector is valid"))
    }};
}

impl DomExtractor {
    fn title(doc: &Html) -> Option<String> {
        doc.select(selector!("title"))
            .next()
            .map(|el| el.text().collect::<String>())
    }

    fn named_meta(doc: &Html, name: &str) -> Option<String> {
        doc.select(selector!("meta[name][content]"))
            .find(|el| {
                el.value()
                    .attr("name")
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
            })
            .and_then(|el| el.value().attr("content"))
            .map(String::from)
    }

    fn headings(doc: &Html) -> Vec<Heading> {
        doc.select(selector!("h1, h2, h3, h4, h5, h6"))
            .filter_map(|el| {
                let level = el.value().name().get(1..)?.parse::<u8>().ok()?;
                Some(Heading {
                    level,
                    text: visible_text(el),
                })
            })
            .collect()
    }

    fn anchors(doc: &Html) -> (Vec<LinkRef>, usize) {
        let mut scanned = 0;
        let mut anchors = Vec::new();
        for el in doc.select(selector!("a[href]")) {
            scanned += 1;
            let href = el.value().attr("href").unwrap_or_default();
            let text = visible_text(el);
            if LinkExtractor::is_retained(href, &text) {
                anchors.push(LinkRef::new(text, href));
            }
        }
        (anchors, scanned)
    }

    fn open_graph(doc: &Html) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        for el in doc.select(selector!("meta[property][content]")) {
            let attrs = el.value();
            let (Some(property), Some(content)) = (attrs.attr("property"), attrs.attr("content"))
            else {
                continue;
            };
            if let Some(key) = property.strip_prefix("og:").filter(|k| !k.is_empty()) {
                data.insert(key.to_string(), content.to_string());
            }
        }
        data
    }

    fn body_text(markup: &str, doc: &Html) -> String {
        // html5ever always synthesizes a body; only trust it when the page had one
        if ContentExtractor::body_inner(markup).is_none() {
            return String::new();
        }
        doc.select(selector!("body"))
            .next()
            .map(|body| {
                let raw = body.text().collect::<String>();
                ContentExtractor::collapse_whitespace(&raw).trim().to_string()
            })
            .unwrap_or_default()
    }
}

impl MarkupExtractor for DomExtractor {
    fn name(&self) -> &'static str {
        "dom"
    }

    #[instrument(skip_all, fields(bytes = markup.len()))]
    fn extract(&self, markup: &str) -> ExtractedPage {
        let doc = Html::parse_document(markup);
        let (anchors, anchors_scanned) = Self::anchors(&doc);

        let page = ExtractedPage {
            title: Self::title(&doc),
            meta_description: Self::named_meta(&doc, "description"),
            keywords: Self::named_meta(&doc, "keywords"),
            headings: Self::headings(&doc),
            anchors,
            anchors_scanned,
            open_graph: Self::open_graph(&doc),
            body_text: Self::body_text(markup, &doc),
        };

        debug!(
            "DOM extraction: {} headings, {}/{} anchors kept",
            page.headings.len(),
            page.anchors.len(),
            page.anchors_scanned
        );
        page
    }
}

fn visible_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::PatternExtractor;

    const PAGE: &str = r#"<html><head>
        <title>Shop</title>
        <meta content="Cheap things" name="description">
        <meta property="og:title" content="A">
        <meta property="og:title" content="B">
        </head><body>
        <h2>Deals <em>today</em></h2>
        <a href="/cart"><span>Cart</span></a>
        <a href="javascript:void(0)">Nope</a>
        <a href="mailto:x@y.z">Mail</a>
        </body></html>"#;

    #[test]
    fn test_dom_recovers_attribute_order() {
        let page = DomExtractor.extract(PAGE);
        assert_eq!(page.meta_description.as_deref(), Some("Cheap things"));
        // the pattern extractor needs name before content
        assert_eq!(PatternExtractor.extract(PAGE).meta_description, None);
    }

    #[test]
    fn test_dom_nested_heading() {
        let page = DomExtractor.extract(PAGE);
        assert_eq!(
            page.headings,
            vec![Heading {
                level: 2,
                text: "Deals today".to_string()
            }]
        );
    }

    #[test]
    fn test_dom_shares_link_and_og_rules() {
        let page = DomExtractor.extract(PAGE);
        assert_eq!(page.anchors, vec![LinkRef::new("Cart", "/cart")]);
        assert_eq!(page.anchors_scanned, 3);
        assert_eq!(page.open_graph["title"], "B");
        assert_eq!(page.title.as_deref(), Some("Shop"));
    }

    #[test]
    fn test_dom_no_body_tag() {
        let page = DomExtractor.extract("<title>x</title><p>loose text</p>");
        assert_eq!(page.body_text, "");
    }
}
