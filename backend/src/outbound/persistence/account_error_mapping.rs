//! Mapping from pool and Diesel failures to [`AccountPersistenceError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::AccountPersistenceError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> AccountPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountPersistenceError::connection(message)
        }
    }
}

/// Classify a Diesel error.
///
/// Email uniqueness violations become
/// [`AccountPersistenceError::DuplicateEmail`]; a locked or closed database
/// is a connection failure; anything else is a query failure with a generic
/// message so SQL text never leaves the adapter.
pub(super) fn map_diesel_error(error: DieselError) -> AccountPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountPersistenceError::duplicate_email()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) if is_lock_contention(info.message()) => {
            AccountPersistenceError::connection("database is busy")
        }
        DieselError::NotFound => AccountPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => AccountPersistenceError::query("database query error"),
        _ => AccountPersistenceError::query("database error"),
    }
}

fn is_lock_contention(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database is busy")
}
