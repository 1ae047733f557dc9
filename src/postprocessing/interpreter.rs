//! Strict and lenient JSON readers for the model's answer.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// First `[{ ... }]` span, non-greedy, across newlines.
const ARRAY_OF_OBJECTS: &str = r"(?s)\[\{.*?\}\]";

fn array_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(ARRAY_OF_OBJECTS).ok())
        .as_ref()
}

/// Plain `serde_json` parse with no repair.
pub fn interpret_strict(cleaned: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, "Strict JSON parse failed");
            None
        }
    }
}

/// Finds the first array-of-objects span in `raw` and retries the parse after
/// swapping every `'` for `"`.
///
/// The swap is lossy: apostrophes inside real text ("Eiffel's") become quotes
/// and usually break the parse, sending the caller to its fallback.
pub fn interpret_lenient(raw: &str) -> Option<Value> {
    let candidate = array_pattern()?.find(raw)?;
    let repaired = candidate.as_str().replace('\'', "\"");

    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(error = %e, span = candidate.as_str(), "Lenient JSON repair failed");
            None
        }
    }
}
