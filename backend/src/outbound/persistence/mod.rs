//! SQLite persistence adapters using Diesel.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; row structs and table definitions stay private to this module.
//!
//! ```no_run
//! use portal::outbound::persistence::{
//!     DbPool, DieselAccountRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! run_migrations("portal.sqlite3").await?;
//! let pool = DbPool::new(PoolConfig::new("portal.sqlite3")).await?;
//! let repo = DieselAccountRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod account_error_mapping;
mod diesel_account_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{BUSY_TIMEOUT, DbPool, PoolConfig, PoolError, SqliteAsync};
