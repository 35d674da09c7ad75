//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::header;

use super::state::HttpState;
use crate::domain::AccountService;
use crate::domain::ports::{FixtureTranscriptionSource, InMemoryAccountRepository};

/// Session middleware with a fresh key, cookie name `session`, and the
/// `Secure` flag off for plain-HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`; panics when absent.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// `Location` header of a redirect response.
pub fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect has a Location header")
        .to_owned()
}

/// State over an in-memory store, returning the store for seeding.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryAccountRepository>) {
    let repo = Arc::new(InMemoryAccountRepository::default());
    let service = Arc::new(AccountService::new(repo.clone()));
    let state = HttpState::new(
        service.clone(),
        service,
        Arc::new(FixtureTranscriptionSource {
            text: "hello world".to_owned(),
        }),
    );
    (state, repo)
}
