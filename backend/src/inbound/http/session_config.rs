//! Cookie session settings read from the environment.
//!
//! | Variable                  | Debug default            | Release        |
//! |---------------------------|--------------------------|----------------|
//! | `SESSION_KEY_FILE`        | `/var/run/secrets/session_key`, ephemeral key if unreadable | must be readable, >= 64 bytes |
//! | `SESSION_COOKIE_SECURE`   | `true`                   | required       |
//! | `SESSION_SAMESITE`        | `Lax`                    | required       |
//! | `SESSION_ALLOW_EPHEMERAL` | `false`                  | required, must be false |
//!
//! Debug builds log a warning and fall back to the default for missing or
//! malformed toggles; release builds refuse to start.

use std::path::PathBuf;
use std::time::Duration;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Strictness applied while reading the toggles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    ///
    /// ```
    /// use portal::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        self == Self::Debug
    }
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("key", &"<redacted>")
            .field("cookie_secure", &self.cookie_secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

impl SessionSettings {
    /// Cookie session middleware expiring sessions `ttl` after their last
    /// change.
    #[must_use]
    pub fn middleware(&self, ttl: Duration) -> SessionMiddleware<CookieSessionStore> {
        let ttl = time::Duration::try_from(ttl).unwrap_or(time::Duration::MAX);
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_secure(self.cookie_secure)
            .cookie_same_site(self.same_site)
            .session_lifecycle(PersistentSession::default().session_ttl(ttl))
            .build()
    }
}

/// Problems with the session toggles.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate the session toggles from `env`.
///
/// ```
/// use mockable::MockEnv;
/// use portal::inbound::http::session_config::{BuildMode, session_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     _ => None,
/// });
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let reader = ToggleReader { env, mode };
    let cookie_secure = reader.read(COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let same_site = reader.read(SAMESITE_ENV, SAMESITE_EXPECTED, default_same_site, parse_same_site)?;
    if same_site == SameSite::None && !cookie_secure {
        if !mode.is_debug() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop the session");
    }
    let allow_ephemeral = reader.read(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, false, parse_bool)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = load_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

struct ToggleReader<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> ToggleReader<'_, E> {
    fn read<T: std::fmt::Debug>(
        &self,
        name: &'static str,
        expected: &'static str,
        fallback: T,
        parse: fn(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            if self.mode.is_debug() {
                warn!(variable = name, ?fallback, "session toggle not set; using default");
                return Ok(fallback);
            }
            return Err(SessionConfigError::MissingEnv { name });
        };
        match parse(&value) {
            Some(parsed) => Ok(parsed),
            None if self.mode.is_debug() => {
                warn!(variable = name, %value, ?fallback, "invalid session toggle; using default");
                Ok(fallback)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        }
    }
}

fn load_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            if bytes.len() >= SESSION_KEY_MIN_LEN {
                return Ok(Key::derive_from(&bytes));
            }
            if !mode.is_debug() {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length: bytes.len(),
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            warn!(
                path = %path.display(),
                length = bytes.len(),
                "session key too short; using a temporary key"
            );
            Ok(Key::generate())
        }
        Err(source) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "session key unreadable; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
