//! Portal entry point: load settings, prepare the database, seed the doctor
//! account, and serve HTTP.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use portal::domain::DoctorBootstrap;
use portal::domain::ports::AccountRepository;
use portal::inbound::http::health::HealthState;
use portal::inbound::http::session_config::{BuildMode, session_settings_from_env};
use portal::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig, run_migrations};
use portal::outbound::transcription::TranscriptionHttpSource;
use portal::server::{ServerConfig, build_http_state, create_server};
use portal::settings::PortalSettings;

fn startup_error(stage: &str, error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{stage}: {error}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PortalSettings::load().map_err(|e| startup_error("settings", e))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| startup_error("session configuration", e))?;

    let database_path = settings.database_path().to_string_lossy().into_owned();
    let applied = run_migrations(&database_path)
        .await
        .map_err(|e| startup_error("migrations", e))?;
    info!(database = %database_path, applied, "database ready");

    let pool = DbPool::new(PoolConfig::new(database_path).with_max_size(settings.pool_size()))
        .await
        .map_err(|e| startup_error("connection pool", e))?;
    let accounts: Arc<dyn AccountRepository> = Arc::new(DieselAccountRepository::new(pool));

    let seed = settings
        .doctor_seed()
        .map_err(|e| startup_error("doctor seed", e))?;
    DoctorBootstrap::new(accounts.clone())
        .ensure_doctor(&seed)
        .await
        .map_err(|e| startup_error("doctor bootstrap", e))?;

    let transcription = TranscriptionHttpSource::new(
        settings
            .transcription_url()
            .map_err(|e| startup_error("transcription endpoint", e))?,
        settings.transcription_timeout(),
    )
    .map_err(|e| startup_error("transcription client", e))?;

    let bind_addr = settings
        .bind_addr()
        .map_err(|e| startup_error("bind address", e))?;
    let config = ServerConfig::new(bind_addr, session, settings.session_ttl());
    let http_state = build_http_state(accounts, Arc::new(transcription));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, config)?;
    info!(%bind_addr, "portal listening");
    server.await
}
