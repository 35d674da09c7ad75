//! Audio transcription demo.
//!
//! ```text
//! GET    /transcribe
//! POST   /transcribe?filename=visit.mp3   (body: raw audio bytes)
//! GET    /transcribe/history
//! POST   /transcribe/history              file_name=..&text=..
//! DELETE /transcribe/history
//! ```
//!
//! Saved transcripts live in the visitor's session, not in the account store.

use std::time::Instant;

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use super::flash::Flash;
use super::pages::{self, flash_redirect, render};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{ApiResult, AudioUpload, Error, SavedTranscript, TranscriptionReport};

pub const TRANSCRIPT_SAVED_MESSAGE: &str = "Transcript saved.";
pub const HISTORY_CLEARED_MESSAGE: &str = "History cleared.";
const HISTORY_PATH: &str = "/transcribe/history";

/// Largest accepted upload.
pub const MAX_AUDIO_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
pub struct TranscribeQuery {
    /// Original file name; its extension selects the accepted formats.
    pub filename: String,
}

/// Demo page.
#[utoipa::path(
    get,
    path = "/transcribe",
    tags = ["transcription"],
    responses((status = 200, description = "Transcription page", body = pages::PageView))
)]
pub async fn transcribe_page(session: SessionContext) -> ApiResult<HttpResponse> {
    render(&session, pages::TRANSCRIBE, None)
}

/// Forward an upload to the transcription service.
#[utoipa::path(
    post,
    path = "/transcribe",
    tags = ["transcription"],
    params(TranscribeQuery),
    request_body(content = Vec<u8>, content_type = "audio/mpeg"),
    responses(
        (status = 200, description = "Transcript and statistics", body = TranscriptionReport),
        (status = 400, description = "Missing name, unsupported format, or empty body", body = Error),
        (status = 503, description = "Transcription service failed", body = Error),
        (status = 500, description = "Unreadable service response", body = Error)
    )
)]
pub async fn transcribe(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<TranscribeQuery>,
    body: web::Bytes,
) -> ApiResult<web::Json<TranscriptionReport>> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let upload = AudioUpload::new(query.into_inner().filename, content_type, body.to_vec())?;

    let started = Instant::now();
    let transcript = state.transcription.transcribe(&upload).await?;
    let report = TranscriptionReport::build(&upload, transcript, started.elapsed());
    info!(
        file = upload.file_name(),
        bytes = upload.bytes().len(),
        words = report.word_count,
        elapsed_seconds = report.elapsed_seconds,
        "transcription completed"
    );
    Ok(web::Json(report))
}

/// Transcript chosen for saving. Missing fields read as blank.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SaveTranscriptForm {
    #[schema(example = "visit.mp3")]
    pub file_name: String,
    #[schema(example = "the patient reports mild headaches")]
    pub text: String,
}

/// History page: the usual page fields plus saved transcripts, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptHistoryView {
    #[schema(example = "transcript_history")]
    pub page: &'static str,
    #[schema(example = "Transcript History")]
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    pub entries: Vec<SavedTranscript>,
}

/// Saved transcripts for this browser session.
#[utoipa::path(
    get,
    path = "/transcribe/history",
    tags = ["transcription"],
    responses((status = 200, description = "Saved transcripts, newest first", body = TranscriptHistoryView))
)]
pub async fn history_page(session: SessionContext) -> ApiResult<web::Json<TranscriptHistoryView>> {
    let flashes = session.take_flashes()?;
    Ok(web::Json(TranscriptHistoryView {
        page: pages::TRANSCRIPT_HISTORY.name,
        title: pages::TRANSCRIPT_HISTORY.title,
        flashes,
        entries: session.transcript_history().newest_first(),
    }))
}

/// Keep a transcript in the session history.
#[utoipa::path(
    post,
    path = "/transcribe/history",
    tags = ["transcription"],
    request_body(content = SaveTranscriptForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirect to the history, or back to /transcribe with a flash"))
)]
pub async fn save_transcript(
    session: SessionContext,
    form: web::Form<SaveTranscriptForm>,
) -> ApiResult<HttpResponse> {
    let SaveTranscriptForm { file_name, text } = form.into_inner();
    let entry = match SavedTranscript::new(file_name, text) {
        Ok(entry) => entry,
        Err(err) => {
            debug!(%err, "transcript not saved");
            return flash_redirect(&session, Flash::error(err.to_string()), "/transcribe");
        }
    };

    let mut history = session.transcript_history();
    history.save(entry);
    session.store_transcript_history(&history)?;
    flash_redirect(&session, Flash::success(TRANSCRIPT_SAVED_MESSAGE), HISTORY_PATH)
}

/// Forget every saved transcript.
#[utoipa::path(
    delete,
    path = "/transcribe/history",
    tags = ["transcription"],
    responses((status = 303, description = "Redirect to the emptied history"))
)]
pub async fn clear_history(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear_transcript_history();
    flash_redirect(&session, Flash::success(HISTORY_CLEARED_MESSAGE), HISTORY_PATH)
}

/// Mount `/transcribe` with the larger upload limit, and its history.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/transcribe")
            .app_data(web::PayloadConfig::new(MAX_AUDIO_BYTES))
            .route(web::get().to(transcribe_page))
            .route(web::post().to(transcribe)),
    )
    .service(
        web::resource(HISTORY_PATH)
            .route(web::get().to(history_page))
            .route(web::post().to(save_transcript))
            .route(web::delete().to(clear_history)),
    );
}
