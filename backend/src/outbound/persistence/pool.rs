//! Async connection pool for the SQLite account store.
//!
//! Diesel's SQLite connection is synchronous; `diesel-async` wraps it in a
//! `SyncConnectionWrapper` that runs each query on the blocking pool, and
//! `bb8` manages checkout. Every new connection sets a busy timeout so
//! concurrent writers queue on the file lock instead of failing with
//! `SQLITE_BUSY`.

use std::time::Duration;

use diesel::ConnectionError;
use diesel::sqlite::SqliteConnection;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;

/// Pooled connection type used by the repositories.
pub type SqliteAsync = SyncConnectionWrapper<SqliteConnection>;

/// How long a connection waits on a locked database before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool settings.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use portal::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("portal.sqlite3")
///     .with_max_size(4)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_path(), "portal.sqlite3");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: eight connections, 30 second checkout timeout.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 8,
            connection_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_path(&self) -> &str {
        &self.database_path
    }
}

fn establish_with_busy_timeout(path: &str) -> BoxFuture<'_, diesel::ConnectionResult<SqliteAsync>> {
    async move {
        let mut conn = SqliteAsync::establish(path).await?;
        diesel::sql_query(format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT.as_millis()))
            .execute(&mut conn)
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    }
    .boxed()
}

/// Shared handle to the SQLite connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<SqliteAsync>,
}

impl DbPool {
    /// Build the pool and open its first connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the database file cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let mut manager_config = ManagerConfig::<SqliteAsync>::default();
        manager_config.custom_setup = Box::new(establish_with_busy_timeout);
        let manager = AsyncDieselConnectionManager::<SqliteAsync>::new_with_config(
            config.database_path.clone(),
            manager_config,
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection frees up within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, SqliteAsync>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_defaults() {
        let config = PoolConfig::new("portal.sqlite3");
        assert_eq!(config.database_path(), "portal.sqlite3");
        assert_eq!(config.max_size, 8);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(3, 3)]
    fn max_size_is_at_least_one(#[case] requested: u32, #[case] expected: u32) {
        let config = PoolConfig::new("x").with_max_size(requested);
        assert_eq!(config.max_size, expected);
    }

    #[rstest]
    fn pool_error_display() {
        assert!(
            PoolError::checkout("timed out")
                .to_string()
                .contains("timed out")
        );
        assert!(PoolError::build("bad path").to_string().contains("bad path"));
    }

    #[tokio::test]
    async fn connections_carry_busy_timeout() {
        use diesel::sql_types::Integer;

        #[derive(diesel::QueryableByName)]
        struct Timeout {
            #[diesel(sql_type = Integer)]
            timeout: i32,
        }

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pool.sqlite3");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(1))
            .await
            .expect("pool builds");
        let mut conn = pool.get().await.expect("checkout");
        let rows: Vec<Timeout> = diesel::sql_query("PRAGMA busy_timeout")
            .load(&mut *conn)
            .await
            .expect("pragma query");
        assert_eq!(rows.as_slice().first().map(|row| row.timeout), Some(5000));
    }
}
