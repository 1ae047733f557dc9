use serde::{Deserialize, Serialize};

use super::cleaner::{Cleaner, CleanerError};
use super::router::{DurationTier, Language, PromptRevision, TopicFocus, Voice};

/// Everything a single "Generate Guide" action needs. Built per action and
/// dropped once the page is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuideRequest {
    pub location: String,
    pub duration: DurationTier,
    pub topic: TopicFocus,
    pub language: Language,
    #[serde(default)]
    pub voice: Voice,
    #[serde(default)]
    pub revision: PromptRevision,
}

impl GuideRequest {
    pub fn new(
        location: &str,
        duration: DurationTier,
        topic: TopicFocus,
        language: Language,
    ) -> Result<Self, CleanerError> {
        Ok(Self {
            location: Cleaner::clean(location)?,
            duration,
            topic,
            language,
            voice: Voice::default(),
            revision: PromptRevision::default(),
        })
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_revision(mut self, revision: PromptRevision) -> Self {
        self.revision = revision;
        self
    }

    /// Voice actually used for narration. Revisions without a voice selector
    /// always narrate with the default voice.
    pub fn narration_voice(&self) -> Voice {
        if self.revision.exposes_voice() {
            self.voice
        } else {
            Voice::default()
        }
    }
}
