//! Wire shape of the transcription service response.

use serde::Deserialize;

use crate::domain::Transcript;

/// `{"text": "..."}`; a missing `text` field means nothing was recognised.
#[derive(Debug, Deserialize)]
pub(super) struct TranscriptionResponseDto {
    #[serde(default)]
    pub(super) text: Option<String>,
}

impl From<TranscriptionResponseDto> for Transcript {
    fn from(value: TranscriptionResponseDto) -> Self {
        Self {
            text: value.text.unwrap_or_default(),
        }
    }
}
