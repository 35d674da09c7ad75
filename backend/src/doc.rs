//! OpenAPI document for the portal's HTTP surface.
//!
//! Form posts, page view models, the transcription demo with its history, and
//! health probes are registered here. Swagger UI serves the document at
//! `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AuthenticatedAccount, Error, ErrorCode, Role, SavedTranscript, TranscriptionReport,
};
use crate::inbound::http::auth::{LoginForm, RegisterForm};
use crate::inbound::http::flash::{Flash, FlashCategory};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::pages::PageView;
use crate::inbound::http::transcribe::{SaveTranscriptForm, TranscriptHistoryView};

struct SessionCookieAddon;

impl Modify for SessionCookieAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieAddon),
    info(
        title = "Patient/Doctor portal",
        description = "Registration, login, role-gated dashboards, and an audio transcription demo."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::pages::index,
        crate::inbound::http::auth::register_page,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login_page,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::dashboards::doctor_dashboard,
        crate::inbound::http::dashboards::patient_dashboard,
        crate::inbound::http::transcribe::transcribe_page,
        crate::inbound::http::transcribe::transcribe,
        crate::inbound::http::transcribe::history_page,
        crate::inbound::http::transcribe::save_transcript,
        crate::inbound::http::transcribe::clear_history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PageView,
        Flash,
        FlashCategory,
        AuthenticatedAccount,
        Role,
        RegisterForm,
        LoginForm,
        TranscriptionReport,
        SavedTranscript,
        SaveTranscriptForm,
        TranscriptHistoryView,
        ProbeStatus,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "auth", description = "Registration and session management"),
        (name = "pages", description = "Page view models"),
        (name = "transcription", description = "Audio transcription demo"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
