//! # Text generation
//!
//! The guide text comes from a single prompt/response call against a hosted
//! language model. Callers only see the [`TextGenerator`] trait so the client
//! can be swapped for a stub in tests.
//!
//! ```text
//! PromptBuilder → TextGenerator::complete → ResponseNormalizer
//! ```

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
mod tests;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LLMError {
    #[error("Gemini API key is not configured")]
    MissingApiKey,
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
    #[error("Request timeout - the API took too long to respond")]
    Timeout,
    #[error("Connection error - unable to reach the API")]
    Connection,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed - check your API key")]
    Authentication,
    #[error("Access forbidden - insufficient permissions")]
    Forbidden,
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse API response as JSON: {0}")]
    InvalidResponse(String),
    #[error("API returned empty response")]
    EmptyResponse,
    #[error("Generation stopped by the provider: {0}")]
    Blocked(String),
}

pub type LLMResult<T> = Result<T, LLMError>;

impl LLMError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => LLMError::Authentication,
            403 => LLMError::Forbidden,
            429 => LLMError::RateLimited,
            500..=599 => LLMError::Server { status, body },
            _ => LLMError::Http { status, body },
        }
    }

    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LLMError::Timeout
        } else if e.is_connect() {
            LLMError::Connection
        } else {
            LLMError::Network(e.to_string())
        }
    }
}

/// `complete(prompt) -> text`. One call, no retries.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> LLMResult<String>;

    fn provider_name(&self) -> &'static str;
}
