//! Social-preview card data derived from OpenGraph properties

use crate::fetch::UrlValidator;
use crate::report::AnalysisResult;
use serde::{Deserialize, Serialize};

/// What a social network would show when the page is shared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraphPreview {
    /// `og:title`
    pub title: Option<String>,
    /// `og:description`
    pub description: Option<String>,
    /// `og:image`
    pub image: Option<String>,
    /// `og:site_name`, else the page hostname without `www.`
    pub display_site: String,
}

impl OpenGraphPreview {
    /// Preview for a report; `None` when the page has no OpenGraph data
    pub fn from_report(report: &AnalysisResult) -> Option<Self> {
        let og = &report.open_graph_data;
        if og.is_empty() {
            return None;
        }

        let display_site = og.get("site_name").cloned().unwrap_or_else(|| {
            UrlValidator::host(&report.url)
                .map(|host| host.replacen("www.", "", 1))
                .unwrap_or_default()
        });

        Some(Self {
            title: og.get("title").cloned(),
            description: og.get("description").cloned(),
            image: og.get("image").cloned(),
            display_site,
        })
    }
}
