//! Role-gated dashboards.

use actix_web::{HttpResponse, get};

use super::guard::{Access, require_role};
use super::pages::{self, Page, render};
use super::session::SessionContext;
use crate::domain::{ApiResult, Role};

async fn dashboard(session: SessionContext, role: Role, page: Page) -> ApiResult<HttpResponse> {
    match require_role(&session, role)? {
        Access::Granted(account) => render(&session, page, Some(account)),
        Access::Denied(redirect) => Ok(redirect),
    }
}

/// Doctor landing page.
#[utoipa::path(
    get,
    path = "/doctor_dashboard",
    tags = ["pages"],
    responses(
        (status = 200, description = "Dashboard for a doctor session", body = pages::PageView),
        (status = 303, description = "Not a doctor; redirect to /login")
    )
)]
#[get("/doctor_dashboard")]
pub async fn doctor_dashboard(session: SessionContext) -> ApiResult<HttpResponse> {
    dashboard(session, Role::Doctor, pages::DOCTOR_DASHBOARD).await
}

/// Patient landing page.
#[utoipa::path(
    get,
    path = "/patient_dashboard",
    tags = ["pages"],
    responses(
        (status = 200, description = "Dashboard for a patient session", body = pages::PageView),
        (status = 303, description = "Not a patient; redirect to /login")
    )
)]
#[get("/patient_dashboard")]
pub async fn patient_dashboard(session: SessionContext) -> ApiResult<HttpResponse> {
    dashboard(session, Role::Patient, pages::PATIENT_DASHBOARD).await
}
