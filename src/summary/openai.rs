//! OpenAI-compatible chat-completions summarizer

use crate::config::SummarizerConfig;
use crate::error::SummarizationError;
use crate::summary::{SummaryInput, SummaryOutput, Summarizer};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use url::Url;

const SYSTEM_PROMPT: &str =
    "You are an SEO expert providing a summary of a website's SEO performance.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Summarizer backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiSummarizer {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for OpenAiSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiSummarizer")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiSummarizer {
    /// Create a summarizer; fails when no API key is configured
    pub fn new(config: &SummarizerConfig) -> Result<Self, SummarizationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SummarizationError::Config("no API key configured".to_string()))?;

        let mut base = Url::parse(&config.api_base)
            .map_err(|e| SummarizationError::Config(format!("invalid API base: {e}")))?;
        // join() replaces the last segment unless the base ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join("chat/completions")
            .map_err(|e| SummarizationError::Config(format!("invalid API base: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SummarizationError::Config(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model.clone(),
        })
    }

    /// Model used for completions
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// The user prompt for a page
    pub fn build_prompt(input: &SummaryInput) -> String {
        format!(
            "Based on the following information, provide a concise summary of the SEO analysis, \
             highlighting key areas for improvement and opportunities.\n\n\
             URL: {}\nTitle: {}\nMeta Description: {}\nKeywords: {}\nContent: {}\n",
            input.url, input.title, input.meta_description, input.keywords, input.content
        )
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    #[instrument(skip(self, input), fields(model = %self.model, url = %input.url))]
    async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutput, SummarizationError> {
        info!("Requesting summary");

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(Self::build_prompt(input)),
                },
            ],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SummarizationError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Summarizer answered {}", status.as_u16());
            return Err(SummarizationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| SummarizationError::Upstream(e.to_string()))?;

        let summary = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(SummarizationError::EmptySummary)?;

        debug!("Summary is {} chars", summary.chars().count());
        Ok(SummaryOutput { summary })
    }
}
