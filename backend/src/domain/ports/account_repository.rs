//! Port abstraction for the account store and its errors.
//!
//! The store answers exact-match queries on email and on the role flag, and
//! enforces email uniqueness at write time. [`InMemoryAccountRepository`]
//! mirrors those semantics for tests and for running without a database.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Email, NewAccount, Role};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Insert rejected by the email uniqueness constraint.
        DuplicateEmail => "an account with this email already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, returning it with its assigned identifier.
    ///
    /// Fails with [`AccountPersistenceError::DuplicateEmail`] when the email
    /// is already taken, even if a prior lookup saw it free.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountPersistenceError>;

    /// Fetch the account registered under exactly this email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountPersistenceError>;

    /// Fetch any one account holding `role`.
    async fn find_any_with_role(&self, role: Role) -> Result<Option<Account>, AccountPersistenceError>;

    /// Count stored accounts, optionally restricted to one role.
    async fn count(&self, role: Option<Role>) -> Result<u64, AccountPersistenceError>;
}

/// Process-local account store.
///
/// # Examples
/// ```
/// use portal::domain::ports::{AccountRepository, InMemoryAccountRepository};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryAccountRepository::default();
/// assert_eq!(repo.count(None).await.unwrap(), 0);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    fn with_accounts<T>(
        &self,
        f: impl FnOnce(&mut Vec<Account>) -> T,
    ) -> Result<T, AccountPersistenceError> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|_| AccountPersistenceError::connection("account store lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountPersistenceError> {
        self.with_accounts(|accounts| {
            if accounts.iter().any(|stored| stored.email() == &account.email) {
                return Err(AccountPersistenceError::duplicate_email());
            }
            let next = i32::try_from(accounts.len() + 1)
                .map_err(|_| AccountPersistenceError::query("account id space exhausted"))?;
            let id = AccountId::new(next)
                .map_err(|err| AccountPersistenceError::query(err.to_string()))?;
            let stored = account.clone().into_account(id);
            accounts.push(stored.clone());
            Ok(stored)
        })?
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountPersistenceError> {
        self.with_accounts(|accounts| {
            accounts
                .iter()
                .find(|stored| stored.email() == email)
                .cloned()
        })
    }

    async fn find_any_with_role(&self, role: Role) -> Result<Option<Account>, AccountPersistenceError> {
        self.with_accounts(|accounts| accounts.iter().find(|stored| stored.role() == role).cloned())
    }

    async fn count(&self, role: Option<Role>) -> Result<u64, AccountPersistenceError> {
        self.with_accounts(|accounts| {
            accounts
                .iter()
                .filter(|stored| role.is_none_or(|wanted| stored.role() == wanted))
                .count() as u64
        })
    }
}
