//! Process settings loaded via OrthoConfig.
//!
//! Every value is optional and read from `PORTAL_*` environment variables,
//! matching command-line flags, or a configuration file. Accessors apply the
//! defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::{
    AccountValidationError, DisplayName, DoctorSeed, Email, Password, PasswordError,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_PATH: &str = "portal.sqlite3";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_TRANSCRIPTION_URL: &str = "http://localhost:8000/transcribe/";
const DEFAULT_TRANSCRIPTION_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_TTL_MINUTES: u64 = 120;
const DEFAULT_DOCTOR_EMAIL: &str = "doctor@gmail.com";
const DEFAULT_DOCTOR_NAME: &str = "Doctor";
const DEFAULT_DOCTOR_PASSWORD: &str = "doctor";

/// A configured value that cannot be used.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid transcription URL '{value}': {source}")]
    TranscriptionUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid bootstrap doctor account: {0}")]
    DoctorAccount(#[from] AccountValidationError),
    #[error("invalid bootstrap doctor password: {0}")]
    DoctorPassword(#[from] PasswordError),
}

/// Portal runtime settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// SQLite database file.
    pub database_path: Option<PathBuf>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// Endpoint receiving audio uploads.
    pub transcription_url: Option<String>,
    pub transcription_timeout_secs: Option<u64>,
    /// Session lifetime after the last change, in minutes.
    pub session_ttl_minutes: Option<u64>,
    pub doctor_email: Option<String>,
    pub doctor_name: Option<String>,
    pub doctor_password: Option<String>,
}

impl PortalSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    pub fn transcription_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .transcription_url
            .as_deref()
            .unwrap_or(DEFAULT_TRANSCRIPTION_URL);
        Url::parse(value).map_err(|source| SettingsError::TranscriptionUrl {
            value: value.to_owned(),
            source,
        })
    }

    pub fn transcription_timeout(&self) -> Duration {
        Duration::from_secs(
            self.transcription_timeout_secs
                .unwrap_or(DEFAULT_TRANSCRIPTION_TIMEOUT_SECS),
        )
    }

    pub fn session_ttl(&self) -> Duration {
        let minutes = self
            .session_ttl_minutes
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
        Duration::from_secs(minutes.saturating_mul(60))
    }

    /// Doctor account created when the store has none.
    pub fn doctor_seed(&self) -> Result<DoctorSeed, SettingsError> {
        Ok(DoctorSeed {
            email: Email::new(self.doctor_email.as_deref().unwrap_or(DEFAULT_DOCTOR_EMAIL))?,
            display_name: DisplayName::new(
                self.doctor_name.as_deref().unwrap_or(DEFAULT_DOCTOR_NAME),
            )?,
            password: Password::new(
                self.doctor_password
                    .as_deref()
                    .unwrap_or(DEFAULT_DOCTOR_PASSWORD),
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Settings loading against a locked process environment.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "PORTAL_BIND_ADDR",
        "PORTAL_DATABASE_PATH",
        "PORTAL_POOL_SIZE",
        "PORTAL_TRANSCRIPTION_URL",
        "PORTAL_TRANSCRIPTION_TIMEOUT_SECS",
        "PORTAL_SESSION_TTL_MINUTES",
        "PORTAL_DOCTOR_EMAIL",
        "PORTAL_DOCTOR_NAME",
        "PORTAL_DOCTOR_PASSWORD",
    ];

    fn load() -> PortalSettings {
        PortalSettings::load_from_iter([OsString::from("portal")]).expect("settings should load")
    }

    fn portal_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(portal_env(&[]));
        let settings = load();

        assert_eq!(
            settings.bind_addr().expect("default bind"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert_eq!(settings.database_path(), PathBuf::from("portal.sqlite3"));
        assert_eq!(settings.pool_size(), DEFAULT_POOL_SIZE);
        assert_eq!(
            settings.transcription_url().expect("default url").as_str(),
            "http://localhost:8000/transcribe/"
        );
        assert_eq!(settings.transcription_timeout(), Duration::from_secs(120));
        assert_eq!(settings.session_ttl(), Duration::from_secs(2 * 60 * 60));

        let seed = settings.doctor_seed().expect("default doctor");
        assert_eq!(seed.email.as_ref(), "doctor@gmail.com");
        assert_eq!(seed.display_name.as_ref(), "Doctor");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(portal_env(&[
            ("PORTAL_BIND_ADDR", "127.0.0.1:9000"),
            ("PORTAL_DATABASE_PATH", "/tmp/clinic.db"),
            ("PORTAL_POOL_SIZE", "2"),
            ("PORTAL_SESSION_TTL_MINUTES", "15"),
            ("PORTAL_DOCTOR_EMAIL", "house@clinic.test"),
        ]));
        let settings = load();

        assert_eq!(
            settings.bind_addr().expect("bind").to_string(),
            "127.0.0.1:9000"
        );
        assert_eq!(settings.database_path(), PathBuf::from("/tmp/clinic.db"));
        assert_eq!(settings.pool_size(), 2);
        assert_eq!(settings.session_ttl(), Duration::from_secs(15 * 60));
        assert_eq!(
            settings.doctor_seed().expect("doctor").email.as_ref(),
            "house@clinic.test"
        );
    }

    #[rstest]
    fn malformed_values_are_reported() {
        let _guard = lock_env(portal_env(&[
            ("PORTAL_BIND_ADDR", "not-an-address"),
            ("PORTAL_TRANSCRIPTION_URL", "::nope"),
        ]));
        let settings = load();

        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(matches!(
            settings.transcription_url(),
            Err(SettingsError::TranscriptionUrl { .. })
        ));
    }
}
