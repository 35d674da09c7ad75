//! Reqwest-backed transcription client.
//!
//! Uploads are sent as a multipart form with a single `file` part. The
//! adapter owns timeout handling, status mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::TranscriptionResponseDto;
use crate::domain::ports::{TranscriptionSource, TranscriptionSourceError};
use crate::domain::{AudioUpload, Transcript};

/// Long recordings take a while to transcribe.
pub const DEFAULT_TRANSCRIPTION_TIMEOUT: Duration = Duration::from_secs(120);

const FALLBACK_MIME: &str = "application/octet-stream";
const USER_AGENT: &str = concat!("portal/", env!("CARGO_PKG_VERSION"));

/// Client for one transcription endpoint.
pub struct TranscriptionHttpSource {
    client: Client,
    endpoint: Url,
}

impl TranscriptionHttpSource {
    /// Build a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn file_part(upload: &AudioUpload) -> Part {
    let part = Part::bytes(upload.bytes().to_vec()).file_name(upload.file_name().to_owned());
    let mime = upload.content_type().unwrap_or(FALLBACK_MIME);
    match part.mime_str(mime) {
        Ok(part) => part,
        Err(error) => {
            debug!(%error, mime, "unusable upload content type; sending part without one");
            Part::bytes(upload.bytes().to_vec())
                .file_name(upload.file_name().to_owned())
        }
    }
}

#[async_trait]
impl TranscriptionSource for TranscriptionHttpSource {
    async fn transcribe(
        &self,
        upload: &AudioUpload,
    ) -> Result<Transcript, TranscriptionSourceError> {
        let form = Form::new().part("file", file_part(upload));
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        decode_response(status, body.as_ref())
    }
}

/// Only `200 OK` carries a transcript; any other status is a failure.
fn decode_response(status: StatusCode, body: &[u8]) -> Result<Transcript, TranscriptionSourceError> {
    if status != StatusCode::OK {
        return Err(map_status_error(status, body));
    }
    parse_transcript(body)
}

fn parse_transcript(body: &[u8]) -> Result<Transcript, TranscriptionSourceError> {
    let decoded: TranscriptionResponseDto = serde_json::from_slice(body).map_err(|error| {
        TranscriptionSourceError::decode(format!("invalid transcription JSON payload: {error}"))
    })?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error) -> TranscriptionSourceError {
    if error.is_timeout() {
        TranscriptionSourceError::timeout(error.to_string())
    } else {
        TranscriptionSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> TranscriptionSourceError {
    warn!(
        status = status.as_u16(),
        body = %body_preview(body),
        "transcription service rejected upload"
    );
    TranscriptionSourceError::status(status.as_u16())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    preview
}
