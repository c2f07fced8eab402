//! End-to-end analysis tests against deterministic capabilities

mod common;

use common::{FakeFetcher, FakeSummarizer, SAMPLE_PAGE};
use pretty_assertions::assert_eq;
use seo_pulse::error::{
    FetchError, SummarizationError, FETCH_FAILURE_MESSAGE, INVALID_URL_MESSAGE,
    UNKNOWN_FAILURE_MESSAGE,
};
use seo_pulse::{Analyzer, DomExtractor, Error, ErrorKind, LinkRef};
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn analyzer(fetcher: &Arc<FakeFetcher>, summarizer: &Arc<FakeSummarizer>) -> Analyzer {
    Analyzer::new(fetcher.clone(), summarizer.clone())
}

#[tokio::test]
async fn test_sample_page_report() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("Solid basics, thin content."));

    let report = analyzer(&fetcher, &summarizer)
        .analyze("https://example.com/")
        .await
        .unwrap();

    assert_eq!(report.url, "https://example.com/");
    assert_eq!(report.title.as_deref(), Some("Acme Widgets | Home"));
    assert_eq!(
        report.meta_description.as_deref(),
        Some("Hand-made widgets since 1999.")
    );
    assert_eq!(report.keyword_list(), vec!["widgets", "gadgets", "acme"]);
    assert_eq!(
        report.links.internal,
        vec![
            LinkRef::new("Products", "/products"),
            LinkRef::new("About", "https://example.com/about"),
        ]
    );
    assert_eq!(
        report.links.external,
        vec![LinkRef::new("Partner Org", "https://partner.org/acme")]
    );
    assert_eq!(report.open_graph_data["title"], "Acme Widgets");
    assert!(report.content_sample.starts_with("Products About Chat Widgets"));
    assert_eq!(report.ai_summary, "Solid basics, thin content.");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_summarizer_receives_raw_scalars() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));

    analyzer(&fetcher, &summarizer)
        .analyze("  https://example.com/  ")
        .await
        .unwrap();

    let input = summarizer.last_input().unwrap();
    assert_eq!(input.url, "https://example.com/");
    assert_eq!(input.meta_description, "  Hand-made widgets since 1999. ");
    assert_eq!(input.keywords, "widgets, gadgets, acme");
    assert_eq!(
        input.content,
        "Products About Chat Widgets for everyone Our widgets are built to last. \
         Partners Partner Org Email sales"
    );
}

#[tokio::test]
async fn test_internal_external_scenario() {
    let html = r#"<html><body><a href="/about">About</a><a href="https://other.com/x">Other</a></body></html>"#;
    let fetcher = Arc::new(FakeFetcher::html(html));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));

    let report = analyzer(&fetcher, &summarizer)
        .analyze("https://example.com")
        .await
        .unwrap();

    assert_eq!(report.links.internal, vec![LinkRef::new("About", "/about")]);
    assert_eq!(
        report.links.external,
        vec![LinkRef::new("Other", "https://other.com/x")]
    );
    assert_eq!(report.content_sample, "AboutOther");
}

#[tokio::test]
async fn test_page_without_body() {
    let html = "<html><head><title>Bare</title></head></html>";
    let fetcher = Arc::new(FakeFetcher::html(html));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));

    let report = analyzer(&fetcher, &summarizer)
        .analyze("https://example.com")
        .await
        .unwrap();

    assert_eq!(report.content_sample, "");
    assert_eq!(report.meta_description, None);
    assert!(report.open_graph_data.is_empty());
    assert_eq!(summarizer.last_input().unwrap().content, "");
}

#[tokio::test]
async fn test_long_body_limits() {
    let html = format!("<body>{}</body>", "é".repeat(5000));
    let fetcher = Arc::new(FakeFetcher::html(&html));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));

    let report = analyzer(&fetcher, &summarizer)
        .analyze("https://example.com")
        .await
        .unwrap();

    let content = summarizer.last_input().unwrap().content;
    assert_eq!(content.chars().count(), 4000);
    assert_eq!(report.content_sample.chars().count(), 500);
    assert!(content.starts_with(&report.content_sample));
}

#[tokio::test]
async fn test_status_failure_skips_summary() {
    let fetcher = Arc::new(FakeFetcher::status(404, "Not Found"));
    let summarizer = Arc::new(FakeSummarizer::answering("unused"));

    let err = analyzer(&fetcher, &summarizer)
        .analyze("https://example.com/missing")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FetchFailure);
    assert_eq!(err.user_message(), "Failed to fetch URL: 404 Not Found");
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_message() {
    let fetcher = Arc::new(FakeFetcher::failing("connection refused"));
    let summarizer = Arc::new(FakeSummarizer::answering("unused"));

    let err = analyzer(&fetcher, &summarizer)
        .analyze("https://unreachable.example")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Fetch(FetchError::Transport(_))));
    assert_eq!(err.user_message(), FETCH_FAILURE_MESSAGE);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_summarization_failure_is_passed_through() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::failing(SummarizationError::Upstream(
        "model overloaded".to_string(),
    )));

    let err = analyzer(&fetcher, &summarizer)
        .analyze("https://example.com")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SummarizationFailure);
    assert_eq!(err.user_message(), "model overloaded");
}

#[tokio::test]
async fn test_invalid_urls_are_rejected_before_fetching() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("unused"));
    let analyzer = analyzer(&fetcher, &summarizer);

    for input in ["", "   ", "example.com", "ftp://example.com/file", "http://"] {
        let err = analyzer.analyze(input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput, "input {input:?}");
        assert_eq!(err.user_message(), INVALID_URL_MESSAGE);
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_dom_extractor_pipeline() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));

    let report = analyzer(&fetcher, &summarizer)
        .with_extractor(Arc::new(DomExtractor))
        .analyze("https://example.com/")
        .await
        .unwrap();

    assert_eq!(report.title.as_deref(), Some("Acme Widgets | Home"));
    assert_eq!(report.links.internal.len(), 2);
    assert_eq!(report.links.external.len(), 1);
}

#[tokio::test]
async fn test_concurrent_analyses_share_one_analyzer() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));
    let analyzer = analyzer(&fetcher, &summarizer);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let analyzer = analyzer.clone();
            tokio::spawn(async move { analyzer.analyze(&format!("https://example.com/{i}")).await })
        })
        .collect();

    for handle in handles {
        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.links.internal.len(), 2);
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
    assert_eq!(summarizer.call_count(), 4);
}

struct PanickingSummarizer;

#[async_trait::async_trait]
impl seo_pulse::Summarizer for PanickingSummarizer {
    async fn summarize(
        &self,
        _input: &seo_pulse::SummaryInput,
    ) -> Result<seo_pulse::SummaryOutput, SummarizationError> {
        panic!("summarizer bug")
    }
}

#[tokio::test]
async fn test_isolated_analysis_turns_panics_into_unknown() {
    let analyzer = Analyzer::new(
        Arc::new(FakeFetcher::html(SAMPLE_PAGE)),
        Arc::new(PanickingSummarizer),
    );

    let err = analyzer
        .analyze_isolated("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert_eq!(err.user_message(), UNKNOWN_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_isolated_analysis_passes_results_through() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));

    let report = analyzer(&fetcher, &summarizer)
        .analyze_isolated("https://example.com/")
        .await
        .unwrap();
    assert_eq!(report.links.external.len(), 1);
}

#[test]
fn test_blocking_analysis() {
    let fetcher = Arc::new(FakeFetcher::html(SAMPLE_PAGE));
    let summarizer = Arc::new(FakeSummarizer::answering("ok"));
    let analyzer = analyzer(&fetcher, &summarizer);

    let report = tokio_test::block_on(analyzer.analyze("http://example.com")).unwrap();
    assert_eq!(report.url, "http://example.com");
}
