//! The analysis pipeline
//!
//! One request flows strictly forward: validate the URL, fetch the page,
//! extract signals, classify links, ask for a summary, assemble the report.
//! The fetch and the summary are the only suspension points and run in
//! sequence. Any failure aborts the request; nothing is retried.

use crate::config::{AnalyzerConfig, SummarizerConfig};
use crate::error::{Error, Result};
use crate::extraction::{LinkClassifier, MarkupExtractor, PatternExtractor};
use crate::fetch::{HttpFetcher, PageFetcher, UrlValidator};
use crate::metrics::global_metrics;
use crate::report::{AnalysisResult, ReportAssembler};
use crate::summary::{OpenAiSummarizer, Summarizer};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

/// Runs analyses against a fetcher, an extractor and a summarizer.
///
/// Holds no per-request state, so one analyzer can serve concurrent
/// requests.
#[derive(Clone)]
pub struct Analyzer {
    fetcher: Arc<dyn PageFetcher>,
    summarizer: Arc<dyn Summarizer>,
    extractor: Arc<dyn MarkupExtractor>,
    assembler: ReportAssembler,
}

impl Analyzer {
    /// Analyzer with the pattern extractor and default limits
    pub fn new(fetcher: Arc<dyn PageFetcher>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self::with_config(fetcher, summarizer, &AnalyzerConfig::default())
    }

    /// Analyzer with the pattern extractor and the given limits
    pub fn with_config(
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Arc<dyn Summarizer>,
        config: &AnalyzerConfig,
    ) -> Self {
        Self {
            fetcher,
            summarizer,
            extractor: Arc::new(PatternExtractor),
            assembler: ReportAssembler::new(config.summary_content_limit, config.sample_limit),
        }
    }

    /// Analyzer talking to the network: HTTP fetcher plus OpenAI summarizer
    pub fn from_config(
        analyzer: &AnalyzerConfig,
        summarizer: &SummarizerConfig,
    ) -> Result<Self> {
        let fetcher = HttpFetcher::new(analyzer)?;
        let summarizer = OpenAiSummarizer::new(summarizer)?;
        Ok(Self::with_config(
            Arc::new(fetcher),
            Arc::new(summarizer),
            analyzer,
        ))
    }

    /// Swap the extraction strategy
    pub fn with_extractor(mut self, extractor: Arc<dyn MarkupExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Name of the extraction strategy in use
    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    /// Analyze one URL and return its report
    pub async fn analyze(&self, url: &str) -> Result<AnalysisResult> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("analyze", %request_id, url = %url.trim());

        let metrics = global_metrics();
        metrics.record_start();
        let started = Instant::now();

        let outcome = self.run(url).instrument(span).await;

        match &outcome {
            Ok(report) => {
                metrics.record_success(started.elapsed());
                info!(
                    %request_id,
                    links = report.link_count(),
                    "Analysis finished in {}ms",
                    started.elapsed().as_millis()
                );
            }
            Err(err) => {
                metrics.record_failure(err.kind());
                warn!(%request_id, kind = err.kind().as_str(), "Analysis failed: {}", err);
            }
        }

        outcome
    }

    /// Like [`analyze`](Self::analyze), but on its own task.
    ///
    /// A panic inside a capability becomes [`Error::Unknown`] instead of
    /// unwinding through the caller.
    pub async fn analyze_isolated(&self, url: &str) -> Result<AnalysisResult> {
        let analyzer = self.clone();
        let url = url.to_string();
        match tokio::spawn(async move { analyzer.analyze(&url).await }).await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                let err = Error::from(join_err);
                global_metrics().record_failure(err.kind());
                warn!("Analysis task aborted: {}", err);
                Err(err)
            }
        }
    }

    async fn run(&self, input: &str) -> Result<AnalysisResult> {
        let url = UrlValidator::validate(input)?;
        let requested = input.trim();

        let markup = self.fetcher.fetch(&url).await?.into_markup()?;
        debug!("Received {} bytes of markup", markup.len());

        let page = self.extractor.extract(&markup);
        debug!(headings = page.headings.len(), "Heading structure:\n{}", page.heading_outline());
        let links = LinkClassifier::new(url).classify(&page.anchors);
        global_metrics().record_links(links.internal.len(), links.external.len(), links.dropped);
        debug!(
            kept = links.total(),
            internal = links.internal.len(),
            external = links.external.len(),
            dropped = links.dropped,
            "Classified links"
        );

        let input = self.assembler.summary_input(requested, &page);
        let summary = self.summarizer.summarize(&input).await?;

        Ok(self.assembler.assemble(requested, &page, links, summary))
    }
}

/// Analyze `url` with a network-backed analyzer built for this one call
pub async fn analyze_url(
    url: &str,
    analyzer: &AnalyzerConfig,
    summarizer: &SummarizerConfig,
) -> Result<AnalysisResult> {
    Analyzer::from_config(analyzer, summarizer)?
        .analyze(url)
        .await
}
