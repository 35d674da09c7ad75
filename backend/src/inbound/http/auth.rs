//! Registration, login, and logout form handlers.
//!
//! ```text
//! GET  /register    POST /register  full_name=..&email=..&password=..
//! GET  /login       POST /login     email=..&password=..
//! GET  /logout
//! ```
//!
//! Form outcomes are flash messages plus a `303 See Other`; only store
//! failures surface as JSON errors.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::flash::Flash;
use super::pages::{self, flash_redirect, render};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{
    ApiResult, DUPLICATE_EMAIL_MESSAGE, Error, ErrorCode, INVALID_CREDENTIALS_MESSAGE,
    LoginCredentials, Registration,
};

pub const REGISTERED_MESSAGE: &str = "Registration successful! Please log in.";
pub const LOGGED_IN_MESSAGE: &str = "Login successful!";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

/// Patient registration form. Missing fields read as blank.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterForm {
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub password: String,
}

/// Login form. Missing fields read as blank.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    #[schema(example = "doctor@gmail.com")]
    pub email: String,
    pub password: String,
}

/// Registration form page.
#[utoipa::path(
    get,
    path = "/register",
    tags = ["auth"],
    responses((status = 200, description = "Registration page", body = pages::PageView))
)]
#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<HttpResponse> {
    render(&session, pages::REGISTER, None)
}

/// Create a patient account.
#[utoipa::path(
    post,
    path = "/register",
    tags = ["auth"],
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to /login on success or /register with a flash"),
        (status = 503, description = "Account store unavailable", body = Error)
    )
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration =
        match Registration::try_from_parts(&form.full_name, &form.email, &form.password) {
            Ok(registration) => registration,
            Err(err) => {
                return flash_redirect(&session, Flash::error(err.to_string()), "/register");
            }
        };

    match state.registration.register(&registration).await {
        Ok(_) => flash_redirect(&session, Flash::message(REGISTERED_MESSAGE), "/login"),
        Err(err) if err.code() == ErrorCode::Conflict => {
            flash_redirect(&session, Flash::message(DUPLICATE_EMAIL_MESSAGE), "/register")
        }
        Err(err) => Err(err),
    }
}

/// Login form page.
#[utoipa::path(
    get,
    path = "/login",
    tags = ["auth"],
    responses((status = 200, description = "Login page", body = pages::PageView))
)]
#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<HttpResponse> {
    render(&session, pages::LOGIN, None)
}

/// Authenticate and land on the role's dashboard.
#[utoipa::path(
    post,
    path = "/login",
    tags = ["auth"],
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the dashboard, or back to /login with a flash",
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 503, description = "Account store unavailable", body = Error)
    )
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    // A blank field is just a failed login; no field-specific hint is given.
    let Ok(credentials) = LoginCredentials::try_from_parts(&form.email, &form.password) else {
        return flash_redirect(&session, Flash::error(INVALID_CREDENTIALS_MESSAGE), "/login");
    };

    match state.login.authenticate(&credentials).await {
        Ok(account) => {
            session.persist_account(&account)?;
            info!(account_id = %account.id, role = ?account.role, "login succeeded");
            flash_redirect(
                &session,
                Flash::success(LOGGED_IN_MESSAGE),
                account.role.dashboard_path(),
            )
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            flash_redirect(&session, Flash::error(INVALID_CREDENTIALS_MESSAGE), "/login")
        }
        Err(err) => Err(err),
    }
}

/// Forget the session unconditionally.
#[utoipa::path(
    get,
    path = "/logout",
    tags = ["auth"],
    responses((status = 303, description = "Redirect to /login"))
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    flash_redirect(&session, Flash::info(LOGGED_OUT_MESSAGE), "/login")
}
