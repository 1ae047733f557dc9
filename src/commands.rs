//! The "Generate Guide" action.
//!
//! ```text
//! Selections → Preprocessor → PromptBuilder → TextGenerator
//!     ok  → ResponseNormalizer ─┐
//!     err → provider error segment + banner ─┴→ NarrationDriver → GuideOutcome
//! ```
//!
//! Nothing survives between actions: each call builds its own request, segments and audio.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument, Span};
use uuid::Uuid;

use crate::config::Config;
use crate::llm::{GeminiClient, TextGenerator};
use crate::narration::{NarrationDriver, SegmentNarration};
use crate::postprocessing::{provider_error_segment, ParsingMethod, ResponseNormalizer};
use crate::preprocessing::{
    GuideRequest, GuideSchema, PromptBuilder, Preprocessor, PreprocessorError, Selections,
};
use crate::server::ServerError;
use crate::speech::{OpenAiSpeech, SpeechSynthesizer};

/// Everything the page needs to show one generated guide.
#[derive(Debug, Clone)]
pub struct GuideOutcome {
    pub request_id: Uuid,
    pub request: GuideRequest,
    pub schema: GuideSchema,
    /// `None` when the text provider failed and no response was parsed.
    pub method: Option<ParsingMethod>,
    /// "Error generating guide: …" when the text provider failed.
    pub error: Option<String>,
    pub narrations: Vec<SegmentNarration>,
    pub generated_at: DateTime<Utc>,
}

impl GuideOutcome {
    pub fn segment_count(&self) -> usize {
        self.narrations.len()
    }
}

#[derive(Clone)]
pub struct GuideService {
    generator: Arc<dyn TextGenerator>,
    narrator: NarrationDriver,
}

impl GuideService {
    pub fn new(generator: Arc<dyn TextGenerator>, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            generator,
            narrator: NarrationDriver::new(synthesizer),
        }
    }

    /// Wires the hosted Gemini and OpenAI clients from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ServerError> {
        let generator = GeminiClient::new(config)?;
        let synthesizer = OpenAiSpeech::new(config)?;
        Ok(Self::new(Arc::new(generator), Arc::new(synthesizer)))
    }

    /// Runs one full action. Only invalid selections (including an empty
    /// location) return `Err`, and they do so before any external call.
    #[instrument(skip(self, selections), fields(request_id = tracing::field::Empty))]
    pub async fn generate_guide(
        &self,
        selections: &Selections,
    ) -> Result<GuideOutcome, PreprocessorError> {
        let request = Preprocessor::process(selections)?;
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", tracing::field::display(request_id));

        let start = Instant::now();
        let schema = request.revision.schema();
        let prompt = PromptBuilder::build(&request);

        info!(
            location = %request.location,
            duration = request.duration.short_name(),
            topic = request.topic.label(),
            language = request.language.label(),
            revision = request.revision.label(),
            provider = self.generator.provider_name(),
            "Generating guide"
        );

        let (segments, method, banner) = match self.generator.complete(&prompt).await {
            Ok(raw) => {
                let normalized = ResponseNormalizer::normalize(&raw);
                (normalized.segments, Some(normalized.method), None)
            }
            Err(e) => {
                error!(error = %e, "Guide generation failed");
                (
                    vec![provider_error_segment(&e.to_string())],
                    None,
                    Some(format!("Error generating guide: {}", e)),
                )
            }
        };

        let narrations = self
            .narrator
            .narrate_all(segments, schema, request.narration_voice())
            .await;

        info!(
            segments = narrations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Guide ready"
        );

        Ok(GuideOutcome {
            request_id,
            request,
            schema,
            method,
            error: banner,
            narrations,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LLMError, LLMResult};
    use crate::postprocessing::FAILURE_TITLE;
    use crate::preprocessing::{CleanerError, Voice};
    use crate::speech::{AudioClip, SpeechResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedGenerator {
        reply: LLMResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn new(reply: LLMResult<String>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn complete(&self, prompt: &str) -> LLMResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }

        fn provider_name(&self) -> &'static str {
            "canned"
        }
    }

    #[derive(Default)]
    struct RecordingSynth {
        texts: Mutex<Vec<(String, Voice)>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynth {
        async fn synthesize(&self, text: &str, voice: Voice) -> SpeechResult<AudioClip> {
            self.texts.lock().unwrap().push((text.to_string(), voice));
            Ok(AudioClip::mp3(b"mp3".to_vec()))
        }
    }

    fn selections(location: &str) -> Selections {
        Selections {
            location: location.to_string(),
            ..Selections::default()
        }
    }

    #[tokio::test]
    async fn test_happy_path_narrates_each_segment() {
        let generator = CannedGenerator::new(Ok(
            r#"```json
[{"title": "Eiffel Tower", "content": "Built in 1889."},
 {"title": "Iron", "content": "Puddled iron."}]
```"#
                .to_string(),
        ));
        let synth = Arc::new(RecordingSynth::default());
        let service = GuideService::new(generator.clone(), synth.clone());

        let outcome = service
            .generate_guide(&selections("Eiffel Tower"))
            .await
            .unwrap();

        assert_eq!(outcome.segment_count(), 2);
        assert_eq!(outcome.method, Some(ParsingMethod::Strict));
        assert!(outcome.error.is_none());
        assert_eq!(outcome.schema, GuideSchema::Standard);

        let texts = synth.texts.lock().unwrap().clone();
        assert_eq!(texts[0].0, "Eiffel Tower. Built in 1889.");
        assert_eq!(texts[1].0, "Iron. Puddled iron.");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Eiffel Tower"));
    }

    #[tokio::test]
    async fn test_provider_failure_yields_error_segment_and_banner() {
        let generator = CannedGenerator::new(Err(LLMError::RateLimited));
        let synth = Arc::new(RecordingSynth::default());
        let service = GuideService::new(generator, synth.clone());

        let outcome = service
            .generate_guide(&selections("Taj Mahal"))
            .await
            .unwrap();

        assert_eq!(outcome.segment_count(), 1);
        assert_eq!(outcome.method, None);
        let segment = &outcome.narrations[0].segment;
        assert_eq!(segment.display_title(), "Error");
        assert_eq!(
            segment.display_content(),
            "Rate limit exceeded - too many requests"
        );
        assert_eq!(
            outcome.error.as_deref(),
            Some("Error generating guide: Rate limit exceeded - too many requests")
        );
        // The error segment is still narrated.
        assert_eq!(synth.texts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let generator = CannedGenerator::new(Ok("Sorry, I cannot help.".to_string()));
        let service = GuideService::new(generator, Arc::new(RecordingSynth::default()));

        let outcome = service
            .generate_guide(&selections("Louvre Museum"))
            .await
            .unwrap();

        assert_eq!(outcome.method, Some(ParsingMethod::Fallback));
        assert_eq!(outcome.narrations[0].segment.display_title(), FAILURE_TITLE);
    }

    #[tokio::test]
    async fn test_empty_location_makes_no_calls() {
        let generator = CannedGenerator::new(Ok("[]".to_string()));
        let synth = Arc::new(RecordingSynth::default());
        let service = GuideService::new(generator.clone(), synth.clone());

        let err = service.generate_guide(&selections("   ")).await.unwrap_err();

        assert_eq!(err, PreprocessorError::Location(CleanerError::EmptyInput));
        assert!(generator.prompts.lock().unwrap().is_empty());
        assert!(synth.texts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_revision_uses_selected_voice_and_description() {
        let generator = CannedGenerator::new(Ok(
            r#"[{"title": "T", "description": "D", "content": "C"}]"#.to_string(),
        ));
        let synth = Arc::new(RecordingSynth::default());
        let service = GuideService::new(generator, synth.clone());

        let mut sel = selections("Colosseum");
        sel.revision = Some("v1".to_string());
        sel.voice = Some("Deep and powerful".to_string());
        let outcome = service.generate_guide(&sel).await.unwrap();

        assert_eq!(outcome.schema, GuideSchema::Described);
        assert_eq!(
            synth.texts.lock().unwrap().clone(),
            vec![("T. D. C".to_string(), Voice::Onyx)]
        );
    }
}
