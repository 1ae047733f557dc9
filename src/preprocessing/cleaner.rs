use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CleanerError {
    #[error("Please enter a monument location")]
    EmptyInput,
    #[error("Location exceeds maximum length: {0}")]
    TooLong(usize),
}

pub struct Cleaner;

impl Cleaner {
    const MAX_LENGTH: usize = 200;

    /// Collapses a free-text location into a single trimmed line.
    pub fn clean(input: &str) -> Result<String, CleanerError> {
        if input.trim().is_empty() {
            return Err(CleanerError::EmptyInput);
        }

        let cleaned = input
            .trim()
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .filter(|&c| !c.is_control())
            .collect::<String>();

        let length = cleaned.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(CleanerError::TooLong(length));
        }

        if cleaned.trim().is_empty() {
            return Err(CleanerError::EmptyInput);
        }

        Ok(cleaned)
    }
}
