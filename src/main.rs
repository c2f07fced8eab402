//! SEO Pulse command-line front-end
//!
//! Analyzes one URL and prints or saves one export of the report.

use anyhow::Context;
use clap::Parser;
use seo_pulse::config::{AnalyzerConfig, SummarizerConfig};
use seo_pulse::metrics::global_metrics;
use seo_pulse::{Analyzer, DomExtractor, ExportFormat, Exporter, PatternExtractor};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// SEO Pulse
#[derive(Parser, Debug)]
#[command(name = "seo-pulse")]
#[command(version)]
#[command(about = "Analyze a web page's SEO signals and export a report")]
struct Args {
    /// Page to analyze
    url: String,

    /// Export format: txt, md, json or html
    #[arg(short, long, default_value = "txt")]
    format: ExportFormat,

    /// Write the report to this path instead of stdout
    #[arg(short, long, conflicts_with = "save")]
    output: Option<PathBuf>,

    /// Write the report to seo-report-<host>.<ext> in the current directory
    #[arg(long)]
    save: bool,

    /// Extraction strategy: pattern or dom
    #[arg(long, default_value = "pattern", value_parser = ["pattern", "dom"])]
    extractor: String,

    /// OpenAI-compatible API base
    #[arg(long, env = "SEO_PULSE_API_BASE")]
    api_base: Option<String>,

    /// API key for the summarizer
    #[arg(long, env = "SEO_PULSE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Summarization model
    #[arg(long, env = "SEO_PULSE_MODEL")]
    model: Option<String>,

    /// Page fetch timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print pipeline metrics to stderr when done
    #[arg(long)]
    metrics: bool,
}

impl Args {
    fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            fetch_timeout_ms: self.timeout_ms,
            ..AnalyzerConfig::default()
        }
    }

    fn summarizer_config(&self) -> SummarizerConfig {
        let mut config = SummarizerConfig::from_env();
        if let Some(base) = &self.api_base {
            config.api_base = base.clone();
        }
        if let Some(key) = &self.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let code = match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = match err.downcast_ref::<seo_pulse::Error>() {
                Some(analysis) => analysis.user_message(),
                None => format!("{err:#}"),
            };
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    };

    if args.metrics {
        eprint!("{}", global_metrics().to_prometheus_format());
    }
    code
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let analyzer = Analyzer::from_config(&args.analyzer_config(), &args.summarizer_config())?;
    let analyzer = match args.extractor.as_str() {
        "dom" => analyzer.with_extractor(Arc::new(DomExtractor)),
        _ => analyzer.with_extractor(Arc::new(PatternExtractor)),
    };

    tracing::info!(
        "SEO Pulse {} analyzing {} with the {} extractor",
        seo_pulse::VERSION,
        args.url,
        analyzer.extractor_name()
    );

    let report = analyzer.analyze_isolated(&args.url).await?;
    let exported = Exporter::export(&report, args.format);
    global_metrics().record_export(args.format);

    let target = match (&args.output, args.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(&exported.filename)),
        (None, false) => None,
    };

    match target {
        Some(path) => {
            tokio::fs::write(&path, exported.body.as_bytes())
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {} ({})", path.display(), exported.mime_type);
        }
        None => print!("{}", exported.body),
    }

    Ok(())
}
