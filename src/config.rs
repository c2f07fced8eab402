//! Analyzer and summarizer configuration
//!
//! Plain structs with sensible defaults. Summarizer credentials can be
//! picked up from the environment; the CLI layers its flags on top.

use std::env;
use std::time::Duration;

/// User-Agent sent with every page fetch
pub const DEFAULT_USER_AGENT: &str = "SEO-Pulse-Bot/1.0";

/// Characters of cleaned body text handed to the summarizer
pub const DEFAULT_SUMMARY_CONTENT_LIMIT: usize = 4000;

/// Characters of cleaned body text stored in the report
pub const DEFAULT_SAMPLE_LIMIT: usize = 500;

/// Default OpenAI-compatible API base
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1/";

/// Default summarization model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const API_KEY_ENV: &str = "SEO_PULSE_API_KEY";
const FALLBACK_API_KEY_ENV: &str = "OPENAI_API_KEY";
const API_BASE_ENV: &str = "SEO_PULSE_API_BASE";
const MODEL_ENV: &str = "SEO_PULSE_MODEL";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// User-Agent header for the page fetch
    pub user_agent: String,
    /// Prefix length of cleaned text sent for summarization
    pub summary_content_limit: usize,
    /// Prefix length of cleaned text kept as `contentSample`
    pub sample_limit: usize,
    /// Fetch timeout in milliseconds (enforced by the HTTP fetcher)
    pub fetch_timeout_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            summary_content_limit: DEFAULT_SUMMARY_CONTENT_LIMIT,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            fetch_timeout_ms: 30000,
        }
    }
}

impl AnalyzerConfig {
    /// Fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Configuration of the OpenAI-compatible summarizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerConfig {
    /// API base URL; a missing trailing slash is added before joining paths
    pub api_base: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_ms: 60000,
        }
    }
}

impl SummarizerConfig {
    /// Defaults overridden by `SEO_PULSE_API_KEY` (or `OPENAI_API_KEY`),
    /// `SEO_PULSE_API_BASE` and `SEO_PULSE_MODEL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api_key = non_empty_env(API_KEY_ENV).or_else(|| non_empty_env(FALLBACK_API_KEY_ENV));
        if let Some(base) = non_empty_env(API_BASE_ENV) {
            config.api_base = base;
        }
        if let Some(model) = non_empty_env(MODEL_ENV) {
            config.model = model;
        }
        config
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
