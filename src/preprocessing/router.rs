use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Spoken words per minute used to turn a duration band into a word band.
pub const WORDS_PER_MINUTE: u32 = 150;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Invalid duration selected: {0}")]
    InvalidDuration(String),
    #[error("Invalid topic focus selected: {0}")]
    InvalidTopic(String),
    #[error("Invalid language selected: {0}")]
    InvalidLanguage(String),
    #[error("Invalid voice selected: {0}")]
    InvalidVoice(String),
    #[error("Invalid prompt revision selected: {0}")]
    InvalidRevision(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationTier {
    Synopsis,
    #[default]
    Story,
    LongStory,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicFocus {
    #[default]
    History,
    FunFacts,
    SurprisingFacts,
    Architecture,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    Hindi,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

/// Field layout the model is asked to produce for each segment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuideSchema {
    /// title, description, content. Deprecated; only the first two prompt
    /// revisions ask for it.
    Described,
    /// title, content
    #[default]
    Standard,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptRevision {
    V1,
    V2,
    #[default]
    V3,
}

impl DurationTier {
    pub const ALL: [DurationTier; 3] = [Self::Synopsis, Self::Story, Self::LongStory];

    pub fn label(&self) -> &'static str {
        match self {
            DurationTier::Synopsis => "Synopsis (10-30 secs)",
            DurationTier::Story => "Story (30 secs - 2 mins)",
            DurationTier::LongStory => "Long Story (2 mins- 5 mins)",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            DurationTier::Synopsis => "Synopsis",
            DurationTier::Story => "Story",
            DurationTier::LongStory => "Long Story",
        }
    }

    pub fn phrase(&self) -> &'static str {
        match self {
            DurationTier::Synopsis => "a brief 10-30 second overview",
            DurationTier::Story => "a 30 second to 2 minute narrative",
            DurationTier::LongStory => "a comprehensive 2-5 minute explanation",
        }
    }

    /// Target spoken length in seconds, inclusive on both ends.
    pub fn seconds(&self) -> (u32, u32) {
        match self {
            DurationTier::Synopsis => (10, 30),
            DurationTier::Story => (30, 120),
            DurationTier::LongStory => (120, 300),
        }
    }

    pub fn word_band(&self) -> (u32, u32) {
        let (low, high) = self.seconds();
        (
            low * WORDS_PER_MINUTE / 60,
            high * WORDS_PER_MINUTE / 60,
        )
    }
}

impl TopicFocus {
    pub const ALL: [TopicFocus; 4] = [
        Self::History,
        Self::FunFacts,
        Self::SurprisingFacts,
        Self::Architecture,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TopicFocus::History => "History",
            TopicFocus::FunFacts => "Fun Facts",
            TopicFocus::SurprisingFacts => "Surprising Facts",
            TopicFocus::Architecture => "Architecture",
        }
    }

    /// Novelty topics ask for standalone claims instead of a chronological account.
    pub fn is_novelty(&self) -> bool {
        matches!(self, TopicFocus::FunFacts | TopicFocus::SurprisingFacts)
    }
}

impl Language {
    pub const ALL: [Language; 4] = [Self::English, Self::Spanish, Self::French, Self::Hindi];

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Hindi => "Hindi",
        }
    }
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Self::Alloy,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Shimmer,
    ];

    /// Identifier sent to the speech endpoint.
    pub fn id(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Voice::Alloy => "Balanced and clear",
            Voice::Echo => "Warm and rounded",
            Voice::Fable => "Authoritative",
            Voice::Onyx => "Deep and powerful",
            Voice::Nova => "Energetic and bright",
            Voice::Shimmer => "Gentle and soothing",
        }
    }
}

impl PromptRevision {
    pub const ALL: [PromptRevision; 3] = [Self::V1, Self::V2, Self::V3];

    pub fn schema(&self) -> GuideSchema {
        match self {
            PromptRevision::V1 | PromptRevision::V2 => GuideSchema::Described,
            PromptRevision::V3 => GuideSchema::Standard,
        }
    }

    pub fn includes_word_band(&self) -> bool {
        !matches!(self, PromptRevision::V1)
    }

    /// Only the first revision lets the user pick a narrator.
    pub fn exposes_voice(&self) -> bool {
        matches!(self, PromptRevision::V1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromptRevision::V1 => "v1",
            PromptRevision::V2 => "v2",
            PromptRevision::V3 => "v3",
        }
    }
}

impl GuideSchema {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            GuideSchema::Described => &["title", "description", "content"],
            GuideSchema::Standard => &["title", "content"],
        }
    }

    pub fn has_description(&self) -> bool {
        matches!(self, GuideSchema::Described)
    }
}

fn normalize_label(value: &str) -> String {
    value.trim().to_lowercase()
}

impl FromStr for DurationTier {
    type Err = RouterError;

    /// Accepts the full UI label or just its leading word, the way the
    /// selector's display text is split.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = normalize_label(s);
        match lowered.split_whitespace().next() {
            Some("synopsis") => Ok(DurationTier::Synopsis),
            Some("story") => Ok(DurationTier::Story),
            Some("long") | Some("longstory") | Some("long_story") => Ok(DurationTier::LongStory),
            _ => Err(RouterError::InvalidDuration(s.to_string())),
        }
    }
}

impl FromStr for TopicFocus {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).replace(['_', '-'], " ").as_str() {
            "history" => Ok(TopicFocus::History),
            "fun facts" | "funfacts" => Ok(TopicFocus::FunFacts),
            "surprising facts" | "surprisingfacts" => Ok(TopicFocus::SurprisingFacts),
            "architecture" => Ok(TopicFocus::Architecture),
            _ => Err(RouterError::InvalidTopic(s.to_string())),
        }
    }
}

impl FromStr for Language {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "english" => Ok(Language::English),
            "spanish" => Ok(Language::Spanish),
            "french" => Ok(Language::French),
            "hindi" => Ok(Language::Hindi),
            _ => Err(RouterError::InvalidLanguage(s.to_string())),
        }
    }
}

impl FromStr for Voice {
    type Err = RouterError;

    /// Accepts either the voice identifier or its description.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Voice::ALL
            .into_iter()
            .find(|voice| voice.id() == wanted || voice.description().to_lowercase() == wanted)
            .ok_or_else(|| RouterError::InvalidVoice(s.to_string()))
    }
}

impl FromStr for PromptRevision {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).trim_start_matches("rev").trim_start_matches('v') {
            "1" => Ok(PromptRevision::V1),
            "2" => Ok(PromptRevision::V2),
            "3" => Ok(PromptRevision::V3),
            _ => Err(RouterError::InvalidRevision(s.to_string())),
        }
    }
}

impl fmt::Display for DurationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl fmt::Display for TopicFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
