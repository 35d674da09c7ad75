//! HTTP mapping for domain errors.
//!
//! Non-form endpoints (transcription, health, extractor failures) answer
//! with the JSON `Error` payload. Internal messages are replaced with a
//! generic one before they leave the process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::ports::TranscriptionSourceError;
use crate::domain::{AudioUploadError, Error, ErrorCode, TRACE_ID_HEADER, TranscriptHistoryError};

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing copy of `error`.
fn client_payload(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), message = self.message(), "request failed");
        }
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

impl From<AudioUploadError> for Error {
    fn from(err: AudioUploadError) -> Self {
        Error::invalid_request(err.to_string())
    }
}

impl From<TranscriptHistoryError> for Error {
    fn from(err: TranscriptHistoryError) -> Self {
        Error::invalid_request(err.to_string())
    }
}

impl From<TranscriptionSourceError> for Error {
    fn from(err: TranscriptionSourceError) -> Self {
        match err {
            TranscriptionSourceError::Status { .. } => Error::service_unavailable(err.to_string()),
            TranscriptionSourceError::Transport { .. } | TranscriptionSourceError::Timeout { .. } => {
                warn!(error = %err, "transcription service unreachable");
                Error::service_unavailable("Transcription service is unavailable.")
            }
            TranscriptionSourceError::Decode { message } => Error::internal(message),
        }
    }
}
