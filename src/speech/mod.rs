//! Speech synthesis for narrated segments.

pub mod audio;
pub mod openai;

pub use audio::AudioClip;
pub use openai::OpenAiSpeech;

use async_trait::async_trait;
use thiserror::Error;

use crate::preprocessing::Voice;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error("OpenAI API key is not configured")]
    MissingApiKey,
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
    #[error("Request timeout - the speech API took too long to respond")]
    Timeout,
    #[error("Connection error - unable to reach the speech API")]
    Connection,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Speech API error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Speech API returned no audio")]
    EmptyAudio,
    #[error("Segment has no text to narrate")]
    NothingToNarrate,
    #[error("Temporary audio file error: {0}")]
    TempFile(String),
}

pub type SpeechResult<T> = Result<T, SpeechError>;

impl SpeechError {
    pub fn from_status(status: u16, body: String) -> Self {
        let body = match status {
            401 => "Authentication failed - check your API key".to_string(),
            429 => "Rate limit exceeded - too many requests".to_string(),
            _ => body,
        };
        SpeechError::Http { status, body }
    }

    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SpeechError::Timeout
        } else if e.is_connect() {
            SpeechError::Connection
        } else {
            SpeechError::Network(e.to_string())
        }
    }

    pub fn from_io(e: std::io::Error) -> Self {
        SpeechError::TempFile(e.to_string())
    }
}

/// `synthesize(text, voice) -> audio`. Each call stands alone.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: Voice) -> SpeechResult<AudioClip>;
}
