use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::audio::{stage_through_tempfile, AudioClip};
use super::{SpeechError, SpeechResult, SpeechSynthesizer};
use crate::config::{ApiKey, Config};
use crate::preprocessing::Voice;

/// Largest input the speech endpoint accepts, in characters.
pub const MAX_INPUT_CHARS: usize = 4096;

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

/// OpenAI-compatible `/audio/speech` client.
#[derive(Debug, Clone)]
pub struct OpenAiSpeech {
    client: Client,
    api_key: Option<ApiKey>,
    base_url: String,
    model: String,
}

impl OpenAiSpeech {
    pub fn new(config: &Config) -> SpeechResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| SpeechError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_api_url.trim_end_matches('/').to_string(),
            model: config.tts_model.clone(),
        })
    }
}

/// Cuts `text` to at most `max_chars` characters without splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    #[instrument(skip(self, text, voice), fields(voice = %voice, text_length = text.len()))]
    async fn synthesize(&self, text: &str, voice: Voice) -> SpeechResult<AudioClip> {
        let api_key = self.api_key.as_ref().ok_or(SpeechError::MissingApiKey)?;

        let input = truncate_chars(text, MAX_INPUT_CHARS);
        if input.len() < text.len() {
            warn!(
                original = text.chars().count(),
                kept = MAX_INPUT_CHARS,
                "Narration text truncated"
            );
        }

        let body = SpeechRequest {
            model: &self.model,
            voice: voice.id(),
            input,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{}/audio/speech", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(SpeechError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SpeechError::from_status(status.as_u16(), error_text));
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;
        if payload.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        debug!(bytes = payload.len(), "Speech synthesized");
        stage_through_tempfile(&payload)
    }
}
