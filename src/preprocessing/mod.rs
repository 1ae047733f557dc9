pub mod router;
pub mod cleaner;
pub mod request;
pub mod prompt;

pub use router::{
    DurationTier, GuideSchema, Language, PromptRevision, RouterError, TopicFocus, Voice,
};
pub use cleaner::{Cleaner, CleanerError};
pub use request::GuideRequest;
pub use prompt::PromptBuilder;

use serde::Deserialize;
use thiserror::Error;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreprocessorError {
    #[error("{0}")]
    Selection(#[from] RouterError),
    #[error("{0}")]
    Location(#[from] CleanerError),
}

/// Raw selector values as they arrive from the page or the command line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Selections {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
}

pub struct Preprocessor;

impl Preprocessor {
    /// Validates the selections. Missing selectors fall back to their defaults;
    /// unknown labels and an empty location are rejected before any external call.
    pub fn process(selections: &Selections) -> Result<GuideRequest, PreprocessorError> {
        let duration = parse_or_default::<DurationTier>(selections.duration.as_deref())?;
        let topic = parse_or_default::<TopicFocus>(selections.topic.as_deref())?;
        let language = parse_or_default::<Language>(selections.language.as_deref())?;
        let voice = parse_or_default::<Voice>(selections.voice.as_deref())?;
        let revision = parse_or_default::<PromptRevision>(selections.revision.as_deref())?;

        let request = GuideRequest::new(&selections.location, duration, topic, language)?
            .with_voice(voice)
            .with_revision(revision);

        Ok(request)
    }
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, RouterError>
where
    T: std::str::FromStr<Err = RouterError> + Default,
{
    match value.map(str::trim) {
        Some(label) if !label.is_empty() => label.parse(),
        _ => Ok(T::default()),
    }
}
