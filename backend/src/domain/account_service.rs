//! Registration and login over the account repository.
//!
//! [`AccountService`] implements both driving ports. Argon2 work runs on the
//! blocking pool so request workers are not stalled by hashing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ports::{
    AccountPersistenceError, AccountRepository, LoginService, RegistrationService,
};
use super::{
    AccountId, AuthenticatedAccount, Error, LoginCredentials, NewAccount, Password, PasswordError,
    PasswordHash, Registration, Role,
};

/// Flash text shown when registering an email that is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists!";
/// Flash text shown for any failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please try again.";

/// Client-facing text for a store that cannot be reached.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Account store is unavailable.";

/// Map repository failures onto HTTP-safe domain errors.
///
/// Connection details stay in the log; clients only see a fixed message.
pub fn map_account_persistence_error(error: AccountPersistenceError) -> Error {
    match error {
        AccountPersistenceError::Connection { message } => {
            warn!(%message, "account store unavailable");
            Error::service_unavailable(STORE_UNAVAILABLE_MESSAGE)
        }
        AccountPersistenceError::Query { message } => Error::internal(message),
        AccountPersistenceError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
    }
}

fn map_password_error(error: PasswordError) -> Error {
    Error::internal(error.to_string())
}

/// Hash `password` on the blocking pool.
pub async fn hash_password(password: Password) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || password.hash())
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(map_password_error)
}

async fn verify_password(hash: PasswordHash, candidate: Password) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || hash.verify(&candidate))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
        .map_err(map_password_error)
}

/// Account use-cases backed by an [`AccountRepository`].
#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, registration: &Registration) -> Result<AccountId, Error> {
        let existing = self
            .accounts
            .find_by_email(registration.email())
            .await
            .map_err(map_account_persistence_error)?;
        if existing.is_some() {
            debug!("registration rejected: email already registered");
            return Err(Error::conflict(DUPLICATE_EMAIL_MESSAGE));
        }

        let password_hash = hash_password(registration.password().clone()).await?;
        let account = self
            .accounts
            .insert(&NewAccount {
                email: registration.email().clone(),
                display_name: registration.display_name().clone(),
                password_hash,
                role: Role::Patient,
            })
            .await
            .map_err(map_account_persistence_error)?;
        info!(account_id = %account.id(), "patient account registered");
        Ok(account.id())
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedAccount, Error> {
        let Some(account) = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_account_persistence_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        };

        let verified =
            verify_password(account.password_hash().clone(), credentials.password().clone())
                .await?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE));
        }
        Ok(AuthenticatedAccount::from(&account))
    }
}

#[cfg(test)]
mod tests;
