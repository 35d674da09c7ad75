//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only depend on domain ports,
//! so they stay testable without a database or network.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegistrationService, TranscriptionSource};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub transcription: Arc<dyn TranscriptionSource>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn RegistrationService>,
        transcription: Arc<dyn TranscriptionSource>,
    ) -> Self {
        Self {
            login,
            registration,
            transcription,
        }
    }
}
