//! Synthesized audio and its scoped on-disk staging.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use std::io::{Read, Seek, SeekFrom, Write};
use tempfile::NamedTempFile;
use tracing::debug;

use super::SpeechError;

pub const MP3_MIME: &str = "audio/mp3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Bytes,
    pub mime_type: &'static str,
}

impl AudioClip {
    pub fn mp3(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: MP3_MIME,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URI for an inline `<audio>` source.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

/// Writes the payload to a temporary `.mp3` file and reads it back.
///
/// The file is owned by a `NamedTempFile`, so it is removed when this function
/// returns, whether the round trip succeeded or not.
pub fn stage_through_tempfile(payload: &[u8]) -> Result<AudioClip, SpeechError> {
    let mut file = tempfile::Builder::new()
        .prefix("local-guide-")
        .suffix(".mp3")
        .tempfile()
        .map_err(SpeechError::from_io)?;

    stage_into(&mut file, payload)
}

fn stage_into(file: &mut NamedTempFile, payload: &[u8]) -> Result<AudioClip, SpeechError> {
    file.write_all(payload).map_err(SpeechError::from_io)?;
    file.flush().map_err(SpeechError::from_io)?;
    file.seek(SeekFrom::Start(0)).map_err(SpeechError::from_io)?;

    let mut audio = Vec::with_capacity(payload.len());
    file.read_to_end(&mut audio).map_err(SpeechError::from_io)?;

    debug!(path = %file.path().display(), bytes = audio.len(), "Audio staged");
    Ok(AudioClip::mp3(audio))
}
