//! Turns an accepted JSON value into segments and guarantees at least one.

use serde_json::Value;

use super::segment::GuideSegment;

pub const FAILURE_TITLE: &str = "Guide Generation Failed";
pub const FAILURE_DESCRIPTION: &str = "Could not generate a guide for the specified location";
pub const FAILURE_CONTENT: &str = "Please try again or check your input.";

pub const ERROR_TITLE: &str = "Error";
pub const ERROR_DESCRIPTION: &str = "Could not generate monument guide";

/// Arrays become one segment per element, in order. Any other value becomes a
/// single segment. An empty array yields nothing.
pub fn into_segments(value: Value) -> Vec<GuideSegment> {
    match value {
        Value::Array(items) => items.into_iter().map(GuideSegment::from_value).collect(),
        other => vec![GuideSegment::from_value(other)],
    }
}

pub fn failure_segment() -> GuideSegment {
    GuideSegment::new(FAILURE_TITLE, FAILURE_CONTENT).with_description(FAILURE_DESCRIPTION)
}

/// Stand-in segment when the text model itself could not be reached.
pub fn provider_error_segment(message: &str) -> GuideSegment {
    GuideSegment::new(ERROR_TITLE, message).with_description(ERROR_DESCRIPTION)
}

pub fn validate(segments: Vec<GuideSegment>) -> Option<Vec<GuideSegment>> {
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}
