//! Narration driver: one speech request per segment, strictly in order.
//!
//! A failed segment is recorded and the driver moves on; nothing here aborts
//! the remaining segments.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::postprocessing::GuideSegment;
use crate::preprocessing::{GuideSchema, Voice};
use crate::speech::{AudioClip, SpeechError, SpeechSynthesizer};


pub const FIELD_SEPARATOR: &str = ". ";

/// Outcome for a single segment.
#[derive(Debug, Clone)]
pub struct SegmentNarration {
    /// 1-based position, as shown on the page.
    pub number: usize,
    pub segment: GuideSegment,
    pub text: String,
    pub audio: Result<AudioClip, SpeechError>,
}

impl SegmentNarration {
    pub fn is_ok(&self) -> bool {
        self.audio.is_ok()
    }
}

/// Joins the schema's textual fields with ". ": title, then description when
/// the schema has one, then content. Missing fields are left out.
pub fn narration_text(segment: &GuideSegment, schema: GuideSchema) -> String {
    schema
        .fields()
        .iter()
        .filter_map(|field| segment.field(field))
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

#[derive(Clone)]
pub struct NarrationDriver {
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl NarrationDriver {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }

    pub async fn narrate_segment(
        &self,
        number: usize,
        segment: GuideSegment,
        schema: GuideSchema,
        voice: Voice,
    ) -> SegmentNarration {
        let text = narration_text(&segment, schema);
        let audio = if text.is_empty() {
            Err(SpeechError::NothingToNarrate)
        } else {
            self.synthesizer.synthesize(&text, voice).await
        };

        if let Err(e) = &audio {
            warn!(segment = number, error = %e, "Audio generation failed for segment");
        }

        SegmentNarration {
            number,
            segment,
            text,
            audio,
        }
    }

    /// Narrates every segment one after another. The output has one entry per
    /// input segment, in the same order.
    #[instrument(skip(self, segments), fields(segments = segments.len()))]
    pub async fn narrate_all(
        &self,
        segments: Vec<GuideSegment>,
        schema: GuideSchema,
        voice: Voice,
    ) -> Vec<SegmentNarration> {
        let start = Instant::now();
        let mut narrations = Vec::with_capacity(segments.len());

        for (idx, segment) in segments.into_iter().enumerate() {
            narrations.push(self.narrate_segment(idx + 1, segment, schema, voice).await);
        }

        info!(
            narrated = narrations.iter().filter(|n| n.is_ok()).count(),
            failed = narrations.iter().filter(|n| !n.is_ok()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Narration finished"
        );
        narrations
    }
}
