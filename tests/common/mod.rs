//! Deterministic stand-ins for the network capabilities

#![allow(dead_code)]

use async_trait::async_trait;
use seo_pulse::error::{FetchError, SummarizationError};
use seo_pulse::{FetchedPage, PageFetcher, Summarizer, SummaryInput, SummaryOutput};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;

/// Serves one canned response (or failure) for every URL
pub struct FakeFetcher {
    response: Result<FetchedPage, FetchError>,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn html(body: &str) -> Self {
        Self::with(Ok(FetchedPage::ok(body)))
    }

    pub fn status(status: u16, reason: &str) -> Self {
        Self::with(Ok(FetchedPage {
            status,
            reason: reason.to_string(),
            body: "<html><body>error page</body></html>".to_string(),
        }))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Err(FetchError::Transport(message.to_string())))
    }

    fn with(response: Result<FetchedPage, FetchError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, _url: &Url) -> Result<FetchedPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// Records every input and answers with a fixed summary or error
pub struct FakeSummarizer {
    answer: Result<String, SummarizationError>,
    pub inputs: Mutex<Vec<SummaryInput>>,
}

impl FakeSummarizer {
    pub fn answering(summary: &str) -> Self {
        Self {
            answer: Ok(summary.to_string()),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: SummarizationError) -> Self {
        Self {
            answer: Err(err),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn last_input(&self) -> Option<SummaryInput> {
        self.inputs.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, input: &SummaryInput) -> Result<SummaryOutput, SummarizationError> {
        self.inputs.lock().unwrap().push(input.clone());
        self.answer
            .clone()
            .map(|summary| SummaryOutput { summary })
    }
}

/// A realistic page exercising every extracted signal
pub const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Acme Widgets | Home</title>
  <meta name="description" content="  Hand-made widgets since 1999. ">
  <meta name="keywords" content="widgets, gadgets, acme">
  <meta property="og:title" content="Acme Widgets">
  <meta property="og:site_name" content="Acme">
  <meta property="og:image" content="https://example.com/og.png">
</head>
<body class="home">
  <header>
    <a href="/" class="logo"><img src="/logo.png" alt="Acme"></a>
    <nav>
      <a href="/products">Products</a>
      <a href="https://example.com/about">About</a>
      <a href="javascript:openChat()">Chat</a>
    </nav>
  </header>
  <main>
    <h1>Widgets for everyone</h1>
    <p>Our widgets are   built to last.</p>
    <h2>Partners</h2>
    <a href="https://partner.org/acme" rel="nofollow">Partner <strong>Org</strong></a>
    <a href="mailto:sales@example.com">Email sales</a>
  </main>
</body>
</html>"#;
