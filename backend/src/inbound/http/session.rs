//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Handlers see a [`SessionContext`] exposing the operations the portal
//! needs: remember the logged-in account, read it back, queue and drain
//! flash messages, keep the visitor's saved transcripts, and forget
//! everything on logout.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use super::flash::Flash;
use crate::domain::{AuthenticatedAccount, Error, TranscriptHistory};

pub(crate) const ACCOUNT_KEY: &str = "account";
pub(crate) const FLASHES_KEY: &str = "_flashes";
pub(crate) const TRANSCRIPT_HISTORY_KEY: &str = "transcript_history";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to persist session: {error}"))
}

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated identity, rotating the session key first so a
    /// pre-login cookie cannot be replayed as the logged-in one.
    pub fn persist_account(&self, account: &AuthenticatedAccount) -> Result<(), Error> {
        self.0.renew();
        self.0.insert(ACCOUNT_KEY, account).map_err(write_error)
    }

    /// Identity stored at login, if any.
    ///
    /// A value that no longer decodes is treated as anonymous.
    pub fn account(&self) -> Result<Option<AuthenticatedAccount>, Error> {
        match self.0.get::<AuthenticatedAccount>(ACCOUNT_KEY) {
            Ok(account) => Ok(account),
            Err(error) => {
                warn!(%error, "discarding undecodable account in session cookie");
                self.0.remove(ACCOUNT_KEY);
                Ok(None)
            }
        }
    }

    /// Drop every session entry, queued flashes included.
    pub fn clear(&self) {
        self.0.clear();
        self.0.renew();
    }

    /// Queue a flash for the next rendered page.
    pub fn push_flash(&self, flash: Flash) -> Result<(), Error> {
        let mut queued = self.pending_flashes()?;
        queued.push(flash);
        self.0.insert(FLASHES_KEY, queued).map_err(write_error)
    }

    /// Remove and return queued flashes, oldest first.
    pub fn take_flashes(&self) -> Result<Vec<Flash>, Error> {
        let queued = self.pending_flashes()?;
        if !queued.is_empty() {
            self.0.remove(FLASHES_KEY);
        }
        Ok(queued)
    }

    /// Transcripts saved in this session; an undecodable value reads as empty.
    pub fn transcript_history(&self) -> TranscriptHistory {
        match self.0.get::<TranscriptHistory>(TRANSCRIPT_HISTORY_KEY) {
            Ok(history) => history.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding undecodable transcript history");
                self.0.remove(TRANSCRIPT_HISTORY_KEY);
                TranscriptHistory::default()
            }
        }
    }

    pub fn store_transcript_history(&self, history: &TranscriptHistory) -> Result<(), Error> {
        self.0
            .insert(TRANSCRIPT_HISTORY_KEY, history)
            .map_err(write_error)
    }

    pub fn clear_transcript_history(&self) {
        self.0.remove(TRANSCRIPT_HISTORY_KEY);
    }

    fn pending_flashes(&self) -> Result<Vec<Flash>, Error> {
        Ok(self
            .0
            .get::<Vec<Flash>>(FLASHES_KEY)
            .map_err(read_error)?
            .unwrap_or_default())
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
