//! Audio upload validation and transcript statistics.
//!
//! The transcription itself happens in an external service reached through
//! [`crate::domain::ports::TranscriptionSource`]; this module owns what goes
//! in (an [`AudioUpload`]) and what the page shows (a
//! [`TranscriptionReport`]).

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use utoipa::ToSchema;

/// Extensions the demo page accepts, compared case-insensitively.
pub const ACCEPTED_AUDIO_EXTENSIONS: [&str; 3] = ["wav", "mp3", "m4a"];

/// Reasons an upload is refused before contacting the service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioUploadError {
    #[error("a file name is required")]
    MissingFileName,
    #[error("unsupported audio format; expected one of wav, mp3, m4a")]
    UnsupportedExtension,
    #[error("uploaded file is empty")]
    EmptyBody,
}

/// Audio file ready to be forwarded for transcription.
///
/// # Examples
/// ```
/// use portal::domain::AudioUpload;
///
/// let upload = AudioUpload::new("visit.MP3", Some("audio/mpeg".into()), vec![1, 2, 3]).unwrap();
/// assert_eq!(upload.file_name(), "visit.MP3");
/// assert!(AudioUpload::new("notes.txt", None, vec![1]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AudioUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl AudioUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, AudioUploadError> {
        let file_name = file_name.into().trim().to_owned();
        if file_name.is_empty() {
            return Err(AudioUploadError::MissingFileName);
        }
        let accepted = file_name
            .rsplit_once('.')
            .map(|(_, ext)| {
                ACCEPTED_AUDIO_EXTENSIONS
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false);
        if !accepted {
            return Err(AudioUploadError::UnsupportedExtension);
        }
        if bytes.is_empty() {
            return Err(AudioUploadError::EmptyBody);
        }
        let content_type = content_type.filter(|value| !value.trim().is_empty());
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Name offered when downloading the transcript: dots become
    /// underscores and `.txt` is appended.
    pub fn download_name(&self) -> String {
        format!("{}.txt", self.file_name.replace('.', "_"))
    }
}

impl fmt::Debug for AudioUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Text returned by the transcription service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
}

/// Transcript plus the statistics shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionReport {
    #[schema(example = "the patient reports mild headaches")]
    pub text: String,
    #[schema(example = 5)]
    pub word_count: usize,
    #[schema(example = 34)]
    pub character_count: usize,
    #[schema(example = 1.25)]
    pub elapsed_seconds: f64,
    #[schema(example = "visit_mp3.txt")]
    pub download_name: String,
}

impl TranscriptionReport {
    /// Derive the report for `upload` from the returned transcript and the
    /// wall time the round trip took.
    pub fn build(upload: &AudioUpload, transcript: Transcript, elapsed: Duration) -> Self {
        let word_count = transcript.text.split_whitespace().count();
        let character_count = transcript.text.chars().count();
        let elapsed_seconds = (elapsed.as_secs_f64() * 100.0).round() / 100.0;
        Self {
            text: transcript.text,
            word_count,
            character_count,
            elapsed_seconds,
            download_name: upload.download_name(),
        }
    }
}
