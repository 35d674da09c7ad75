//! Role check for the dashboards.
//!
//! A page requiring a role is shown only when the session holds an account
//! with that role. Anyone else gets an `Unauthorized` flash and is sent to
//! the login form.

use actix_web::HttpResponse;
use tracing::debug;

use super::flash::Flash;
use super::pages::flash_redirect;
use super::session::SessionContext;
use crate::domain::{ApiResult, AuthenticatedAccount, Role};

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Outcome of a role check.
#[derive(Debug)]
pub enum Access {
    Granted(AuthenticatedAccount),
    /// Redirect to send instead of the page.
    Denied(HttpResponse),
}

/// Check that the session belongs to an account with `required`.
pub fn require_role(session: &SessionContext, required: Role) -> ApiResult<Access> {
    match session.account()? {
        Some(account) if account.role == required => Ok(Access::Granted(account)),
        other => {
            debug!(
                ?required,
                actual = ?other.map(|account| account.role),
                "role check failed"
            );
            flash_redirect(session, Flash::danger(UNAUTHORIZED_MESSAGE), "/login")
                .map(Access::Denied)
        }
    }
}
