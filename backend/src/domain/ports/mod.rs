//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod login_service;
mod registration_service;
mod transcription_source;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{
    AccountPersistenceError, AccountRepository, InMemoryAccountRepository,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use transcription_source::MockTranscriptionSource;
pub use transcription_source::{
    FixtureTranscriptionSource, TranscriptionSource, TranscriptionSourceError,
};
