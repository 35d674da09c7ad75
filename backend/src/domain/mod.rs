//! Domain primitives, use-cases, and ports.
//!
//! Types here are transport-agnostic: inbound adapters translate form posts
//! into [`Registration`] and [`LoginCredentials`], outbound adapters
//! implement the traits under [`ports`].

pub mod account;
pub mod account_service;
pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod transcript_history;
pub mod transcription;

pub use self::account::{
    Account, AccountId, AccountValidationError, AuthenticatedAccount, DisplayName, Email,
    NewAccount, Role,
};
pub use self::account_service::{
    AccountService, DUPLICATE_EMAIL_MESSAGE, INVALID_CREDENTIALS_MESSAGE, STORE_UNAVAILABLE_MESSAGE,
};
pub use self::auth::{CredentialField, CredentialValidationError, LoginCredentials, Registration};
pub use self::bootstrap::{BootstrapError, BootstrapOutcome, DoctorBootstrap, DoctorSeed};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::password::{Password, PasswordError, PasswordHash};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::transcript_history::{
    MAX_HISTORY_BYTES, MAX_SAVED_TRANSCRIPTS, SavedTranscript, TranscriptHistory,
    TranscriptHistoryError,
};
pub use self::transcription::{
    ACCEPTED_AUDIO_EXTENSIONS, AudioUpload, AudioUploadError, Transcript, TranscriptionReport,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
