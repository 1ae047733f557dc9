//! Cleans and trims the raw LLM response.

/// Removes every ```json and ``` marker, wherever it appears, then trims.
pub fn clean(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}
