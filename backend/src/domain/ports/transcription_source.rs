//! Driven port for the external speech-to-text service.

use async_trait::async_trait;

use crate::domain::{AudioUpload, Transcript};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the transcription service.
    pub enum TranscriptionSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "transcription transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "transcription timeout: {message}",
        /// The service answered with a non-success status.
        Status { status: u16 } =>
            "Failed with status code: {status}",
        /// The response body was not the expected JSON.
        Decode { message: String } =>
            "transcription response decode failed: {message}",
    }
}

/// Port for turning uploaded audio into text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptionSource: Send + Sync {
    /// Forward one upload and return the recognised text.
    async fn transcribe(
        &self,
        upload: &AudioUpload,
    ) -> Result<Transcript, TranscriptionSourceError>;
}

/// Source that echoes a fixed transcript; used when no service is wired.
#[derive(Debug, Clone, Default)]
pub struct FixtureTranscriptionSource {
    pub text: String,
}

#[async_trait]
impl TranscriptionSource for FixtureTranscriptionSource {
    async fn transcribe(
        &self,
        _upload: &AudioUpload,
    ) -> Result<Transcript, TranscriptionSourceError> {
        Ok(Transcript {
            text: self.text.clone(),
        })
    }
}
