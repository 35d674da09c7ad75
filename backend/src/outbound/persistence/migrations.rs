//! Embedded schema migrations, applied at startup.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure while opening the database or applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to open database at {path}: {message}")]
    Connect { path: String, message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    #[error("migration task aborted: {message}")]
    Join { message: String },
}

fn run_blocking(path: &str) -> Result<usize, MigrationError> {
    let mut conn = SqliteConnection::establish(path).map_err(|err| MigrationError::Connect {
        path: path.to_owned(),
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(applied.len())
}

/// Create the database file if needed and bring its schema up to date.
///
/// Diesel's migration harness is synchronous, so it runs on the blocking
/// pool. Returns the number of migrations applied.
pub async fn run_migrations(database_path: &str) -> Result<usize, MigrationError> {
    let path = database_path.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_blocking(&path))
        .await
        .map_err(|err| MigrationError::Join {
            message: err.to_string(),
        })??;
    info!(applied, database = database_path, "database migrations complete");
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("migrate.sqlite3");
        let path = path.to_string_lossy();

        assert_eq!(run_migrations(&path).await.expect("first run"), 1);
        assert_eq!(run_migrations(&path).await.expect("second run"), 0);
    }

    #[tokio::test]
    async fn unreachable_path_is_a_connect_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("nested").join("db.sqlite3");
        let err = run_migrations(&path.to_string_lossy())
            .await
            .expect_err("missing directory must fail");
        assert!(matches!(err, MigrationError::Connect { .. }));
    }
}
