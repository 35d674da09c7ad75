//! Account data model.
//!
//! An account is the only persisted entity: a patient or doctor identity with
//! a hashed credential and a role flag. Accounts are created by registration
//! (always patients) or by the bootstrap seeder (always a doctor) and are
//! never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::password::PasswordHash;

/// Validation errors raised by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyEmail,
    EmptyDisplayName,
    InvalidId,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyDisplayName => write!(f, "full name must not be empty"),
            Self::InvalidId => write!(f, "account id must be a positive integer"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Store-assigned account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i32", into = "i32")]
#[schema(value_type = i32, example = 1)]
pub struct AccountId(i32);

impl AccountId {
    /// Wrap a raw identifier; the store only hands out positive values.
    pub fn new(raw: i32) -> Result<Self, AccountValidationError> {
        if raw <= 0 {
            return Err(AccountValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Raw integer value for persistence.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<AccountId> for i32 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login identifier.
///
/// Surrounding whitespace is trimmed; otherwise the value is kept verbatim and
/// compared exactly. No format validation is applied.
///
/// # Examples
/// ```
/// use portal::domain::Email;
///
/// let email = Email::new("  ada@example.com ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(Email::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Name shown on the account's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`]; only blank names are rejected.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Role flag deciding dashboard routing and page access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    /// Map the persisted boolean flag onto a role.
    pub fn from_doctor_flag(is_doctor: bool) -> Self {
        if is_doctor { Self::Doctor } else { Self::Patient }
    }

    /// Persisted boolean flag for this role.
    pub fn is_doctor(self) -> bool {
        matches!(self, Self::Doctor)
    }

    /// Path of the dashboard this role lands on after login.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Doctor => "/doctor_dashboard",
            Self::Patient => "/patient_dashboard",
        }
    }
}

/// Stored account.
///
/// ## Invariants
/// - `id` was assigned by the store.
/// - `password_hash` is a PHC string, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: Email,
    display_name: DisplayName,
    password_hash: PasswordHash,
    role: Role,
}

impl Account {
    /// Assemble an account from stored components.
    pub fn new(
        id: AccountId,
        email: Email,
        display_name: DisplayName,
        password_hash: PasswordHash,
        role: Role,
    ) -> Self {
        Self {
            id,
            email,
            display_name,
            password_hash,
            role,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Account awaiting insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: Email,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
    pub role: Role,
}

impl NewAccount {
    /// Attach the store-assigned identifier.
    pub fn into_account(self, id: AccountId) -> Account {
        Account::new(id, self.email, self.display_name, self.password_hash, self.role)
    }
}

/// Identity carried by the session once login succeeds.
///
/// Only the identifier and role are kept; the role is fixed at login time
/// for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedAccount {
    pub id: AccountId,
    pub role: Role,
}

impl From<&Account> for AuthenticatedAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id(),
            role: account.role(),
        }
    }
}
