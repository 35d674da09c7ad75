//! Assemble handler state from outbound adapters.

use std::sync::Arc;

use crate::domain::AccountService;
use crate::domain::ports::{AccountRepository, TranscriptionSource};
use crate::inbound::http::state::HttpState;

/// One [`AccountService`] backs both the login and registration ports.
pub fn build_http_state(
    accounts: Arc<dyn AccountRepository>,
    transcription: Arc<dyn TranscriptionSource>,
) -> HttpState {
    let service = Arc::new(AccountService::new(accounts));
    HttpState::new(service.clone(), service, transcription)
}
