//! Driving port for patient self-registration.

use async_trait::async_trait;

use crate::domain::{AccountId, Error, Registration};

/// Create patient accounts from validated registrations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Store a new patient account.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] when the email is
    /// already registered; nothing is written in that case.
    async fn register(&self, registration: &Registration) -> Result<AccountId, Error>;
}
