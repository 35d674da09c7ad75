//! Authentication inputs: login credentials and registration requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate raw strings before a handler talks to a port or service.
//! Beyond rejecting blank fields no format or strength rules apply.

use std::fmt;

use super::account::{AccountValidationError, DisplayName, Email};
use super::password::{Password, PasswordError};

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    FullName,
    Email,
    Password,
}

impl CredentialField {
    /// Form field name as submitted by the browser.
    pub fn form_name(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// A required field was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialValidationError {
    field: CredentialField,
}

impl CredentialValidationError {
    pub fn field(self) -> CredentialField {
        self.field
    }
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            CredentialField::FullName => write!(f, "Full name must not be empty."),
            CredentialField::Email => write!(f, "Email must not be empty."),
            CredentialField::Password => write!(f, "Password must not be empty."),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<CredentialField> for CredentialValidationError {
    fn from(field: CredentialField) -> Self {
        Self { field }
    }
}

fn email_field(raw: &str) -> Result<Email, CredentialValidationError> {
    Email::new(raw).map_err(|_: AccountValidationError| CredentialField::Email.into())
}

fn password_field(raw: &str) -> Result<Password, CredentialValidationError> {
    Password::new(raw).map_err(|_: PasswordError| CredentialField::Password.into())
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" doctor@gmail.com ", "doctor").unwrap();
/// assert_eq!(creds.email().as_ref(), "doctor@gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            email: email_field(email)?,
            password: password_field(password)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated patient self-registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    display_name: DisplayName,
    email: Email,
    password: Password,
}

impl Registration {
    /// Construct a registration from raw form inputs, checked in form order.
    pub fn try_from_parts(
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let display_name =
            DisplayName::new(full_name).map_err(|_| CredentialField::FullName)?;
        Ok(Self {
            display_name,
            email: email_field(email)?,
            password: password_field(password)?,
        })
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}
