//! Page view models and the public, data-free pages.
//!
//! Every page is returned as JSON describing what a front end should render.
//! Rendering drains the session's pending flashes.

use actix_web::http::header;
use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::flash::Flash;
use super::session::SessionContext;
use crate::domain::{ApiResult, AuthenticatedAccount};

/// JSON description of a rendered page.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageView {
    #[schema(example = "login")]
    pub page: &'static str,
    #[schema(example = "Login")]
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AuthenticatedAccount>,
}

/// A routable page: identifier and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub name: &'static str,
    pub title: &'static str,
}

pub const REGISTER: Page = Page { name: "register", title: "Register" };
pub const LOGIN: Page = Page { name: "login", title: "Login" };
pub const DOCTOR_DASHBOARD: Page = Page { name: "doctor_dashboard", title: "Doctor Dashboard" };
pub const PATIENT_DASHBOARD: Page = Page { name: "patient_dashboard", title: "Patient Dashboard" };
pub const TRANSCRIBE: Page = Page { name: "transcribe", title: "Audio Transcription" };
pub const TRANSCRIPT_HISTORY: Page = Page { name: "transcript_history", title: "Transcript History" };

/// Placeholder pages with no data binding and no access check.
pub const PLACEHOLDER_PAGES: [Page; 6] = [
    Page { name: "view_profiles", title: "View Profiles" },
    Page { name: "review_results", title: "Review Results" },
    Page { name: "progress_analysis", title: "Progress Analysis" },
    Page { name: "start_game", title: "Start Game" },
    Page { name: "view_progress", title: "View Progress" },
    Page { name: "achievements", title: "Achievements" },
];

/// Render `page`, draining queued flashes.
pub fn render(
    session: &SessionContext,
    page: Page,
    account: Option<AuthenticatedAccount>,
) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(HttpResponse::Ok().json(PageView {
        page: page.name,
        title: page.title,
        flashes,
        account,
    }))
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Queue `flash` and redirect to `location`.
pub fn flash_redirect(
    session: &SessionContext,
    flash: Flash,
    location: &str,
) -> ApiResult<HttpResponse> {
    session.push_flash(flash)?;
    Ok(see_other(location))
}

/// Entry point; always lands on the login form.
#[utoipa::path(
    get,
    path = "/",
    tags = ["pages"],
    responses((status = 303, description = "Redirect to /login"))
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    see_other("/login")
}

async fn placeholder(page: Page, session: SessionContext) -> ApiResult<HttpResponse> {
    render(&session, page, None)
}

/// Mount every placeholder page at `/<name>`.
pub fn configure_placeholders(cfg: &mut web::ServiceConfig) {
    for page in PLACEHOLDER_PAGES {
        cfg.route(
            &format!("/{}", page.name),
            web::get().to(move |session: SessionContext| placeholder(page, session)),
        );
    }
}
