//! Driving port for login.
//!
//! Inbound adapters authenticate credentials through this trait without
//! importing the account store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthenticatedAccount, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the account identity and role.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAccount, Error>;
}
