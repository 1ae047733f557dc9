//! Recovers guide segments from whatever text the model returned.
//!
//! The chain always runs in the same order:
//!
//! ```text
//! raw → strip fences → strict parse ─ ok ─────────────────────────┐
//!                          └ fail → first [{…}] span → ' to " → strict parse ─ ok ─┤
//!                                                                   └ fail → failure segment
//! ```
//!
//! No stage returns an error and the result is never empty.

pub mod formatter;
pub mod interpreter;
pub mod segment;
pub mod validator;

pub use formatter::clean;
pub use interpreter::{interpret_lenient, interpret_strict};
pub use segment::GuideSegment;
pub use validator::{failure_segment, provider_error_segment, FAILURE_TITLE};

use serde::Serialize;
use tracing::{debug, warn};


/// Which stage of the chain produced the segments.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingMethod {
    Strict,
    Lenient,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGuide {
    pub segments: Vec<GuideSegment>,
    pub method: ParsingMethod,
}

pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize(raw: &str) -> NormalizedGuide {
        let cleaned = clean(raw);

        if let Some(segments) =
            interpret_strict(&cleaned).and_then(|v| validator::validate(validator::into_segments(v)))
        {
            debug!(segments = segments.len(), "Model response parsed strictly");
            return NormalizedGuide {
                segments,
                method: ParsingMethod::Strict,
            };
        }

        if let Some(segments) =
            interpret_lenient(raw).and_then(|v| validator::validate(validator::into_segments(v)))
        {
            debug!(segments = segments.len(), "Model response recovered leniently");
            return NormalizedGuide {
                segments,
                method: ParsingMethod::Lenient,
            };
        }

        warn!(
            response_length = raw.len(),
            "Model response could not be parsed, substituting failure segment"
        );
        NormalizedGuide {
            segments: vec![failure_segment()],
            method: ParsingMethod::Fallback,
        }
    }
}

/// Shorthand for callers that only need the segments.
pub fn normalize(raw: &str) -> Vec<GuideSegment> {
    ResponseNormalizer::normalize(raw).segments
}
