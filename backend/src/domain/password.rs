//! Salted one-way password hashing with Argon2id.
//!
//! Plaintext passwords only exist as [`Password`] values, which zero their
//! buffer on drop. What reaches the store is a [`PasswordHash`] in PHC string
//! format (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`), so the salt and
//! parameters travel with the digest.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use zeroize::Zeroizing;

/// Errors raised while hashing or parsing credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    /// The submitted password was empty.
    #[error("password must not be empty")]
    Empty,
    /// The hasher rejected its input.
    #[error("failed to hash password: {message}")]
    Hashing { message: String },
    /// A stored value is not a well-formed PHC string.
    #[error("stored password hash is malformed: {message}")]
    MalformedHash { message: String },
}

/// Caller-supplied plaintext password.
///
/// Whitespace is preserved so credential comparisons hold no surprises.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a plaintext password, rejecting the empty string.
    pub fn new(raw: impl Into<String>) -> Result<Self, PasswordError> {
        let raw = Zeroizing::new(raw.into());
        if raw.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(raw))
    }

    /// Plaintext bytes handed to the hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Hash with a fresh random salt and the default Argon2id parameters.
    pub fn hash(&self) -> Result<PasswordHash, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(self.expose().as_bytes(), &salt)
            .map_err(|err| PasswordError::Hashing {
                message: err.to_string(),
            })?;
        Ok(PasswordHash(digest.to_string()))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// PHC-format Argon2 digest as stored in the account table.
///
/// # Examples
/// ```
/// use portal::domain::Password;
///
/// let password = Password::new("correct horse").unwrap();
/// let hash = password.hash().unwrap();
/// assert!(hash.as_ref().starts_with("$argon2id$"));
/// assert!(hash.verify(&password).unwrap());
/// assert!(!hash.verify(&Password::new("wrong").unwrap()).unwrap());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Accept a stored PHC string after checking it parses.
    pub fn from_phc(raw: impl Into<String>) -> Result<Self, PasswordError> {
        let raw = raw.into();
        PhcHash::new(&raw).map_err(|err| PasswordError::MalformedHash {
            message: err.to_string(),
        })?;
        Ok(Self(raw))
    }

    /// Check a submitted password against this digest.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the digest itself
    /// cannot be used.
    pub fn verify(&self, candidate: &Password) -> Result<bool, PasswordError> {
        let parsed = PhcHash::new(&self.0).map_err(|err| PasswordError::MalformedHash {
            message: err.to_string(),
        })?;
        match Argon2::default().verify_password(candidate.expose().as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordError::MalformedHash {
                message: err.to_string(),
            }),
        }
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
