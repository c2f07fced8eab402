//! Error types for SEO Pulse
//!
//! This module provides the error hierarchy using `thiserror`. Every failure
//! aborts the analysis of a single URL; none of them are retried.

use thiserror::Error;

/// Message shown when a fetch fails below the HTTP layer
pub const FETCH_FAILURE_MESSAGE: &str =
    "Could not retrieve the website. Please check the URL and if the site is publicly accessible.";

/// Message shown for failures that have no better description
pub const UNKNOWN_FAILURE_MESSAGE: &str = "An unknown error occurred during analysis.";

/// Validation message for a malformed URL
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";

/// The main error type for SEO Pulse operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request itself was malformed (e.g. not a URL)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Page retrieval failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The summarization capability failed
    #[error("Summarization error: {0}")]
    Summarization(#[from] SummarizationError),

    /// Anything else, such as a panicked analysis task
    #[error("{0}")]
    Unknown(String),
}

/// Page fetch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("Failed to fetch URL: {status} {reason}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Reason phrase
        reason: String,
    },

    /// Connection, TLS, DNS or body read failure
    #[error("Network error: {0}")]
    Transport(String),
}

/// Summarization capability errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizationError {
    /// The summarizer is not configured (missing key, bad endpoint)
    #[error("Summarizer configuration error: {0}")]
    Config(String),

    /// Upstream answered with an error status
    #[error("Summarizer API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body or reason
        message: String,
    },

    /// Upstream call failed for any other reason
    #[error("{0}")]
    Upstream(String),

    /// Upstream answered but produced no text
    #[error("Summarizer returned an empty summary")]
    EmptySummary,
}

/// Coarse classification of a failure, used for reporting and metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed URL
    InvalidInput,
    /// Non-2xx status or transport failure
    FetchFailure,
    /// Summarizer failure
    SummarizationFailure,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::FetchFailure => "fetch_failure",
            ErrorKind::SummarizationFailure => "summarization_failure",
            ErrorKind::Unknown => "unknown",
        }
    }
}

/// Result type alias for SEO Pulse operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid-input error from a message
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an unknown error from a message
    pub fn unknown<S: Into<String>>(msg: S) -> Self {
        Error::Unknown(msg.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::Fetch(_) => ErrorKind::FetchFailure,
            Error::Summarization(_) => ErrorKind::SummarizationFailure,
            Error::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The message to surface to whoever requested the analysis.
    ///
    /// Transport-level fetch failures collapse into a generic "could not
    /// retrieve" message; status failures and summarizer failures keep their
    /// own text.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(msg) => msg.clone(),
            Error::Fetch(FetchError::Transport(_)) => FETCH_FAILURE_MESSAGE.to_string(),
            Error::Fetch(err @ FetchError::Status { .. }) => err.to_string(),
            Error::Summarization(err) => err.to_string(),
            Error::Unknown(_) => UNKNOWN_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Unknown(format!("analysis task failed: {err}"))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}
