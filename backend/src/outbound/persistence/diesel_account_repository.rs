//! SQLite-backed `AccountRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountPersistenceError, AccountRepository};
use crate::domain::{Account, AccountId, DisplayName, Email, NewAccount, PasswordHash, Role};

use super::account_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel implementation of the account store.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain account, rejecting rows that violate its invariants.
fn row_to_account(row: AccountRow) -> Result<Account, AccountPersistenceError> {
    let corrupt = |field: &str, err: &dyn std::fmt::Display| {
        warn!(account_id = row.id, field, error = %err, "stored account row is invalid");
        AccountPersistenceError::query(format!("stored account has invalid {field}"))
    };
    let id = AccountId::new(row.id).map_err(|err| corrupt("id", &err))?;
    let email = Email::new(&row.email).map_err(|err| corrupt("email", &err))?;
    let display_name =
        DisplayName::new(&row.display_name).map_err(|err| corrupt("display_name", &err))?;
    let password_hash =
        PasswordHash::from_phc(row.password_hash.as_str()).map_err(|err| corrupt("password_hash", &err))?;
    Ok(Account::new(
        id,
        email,
        display_name,
        password_hash,
        Role::from_doctor_flag(row.is_doctor),
    ))
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAccountRow {
            email: account.email.as_ref(),
            display_name: account.display_name.as_ref(),
            password_hash: account.password_hash.as_ref(),
            is_doctor: account.role.is_doctor(),
        };
        let stored = diesel::insert_into(accounts::table)
            .values(&row)
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_account(stored)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn find_any_with_role(&self, role: Role) -> Result<Option<Account>, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = accounts::table
            .filter(accounts::is_doctor.eq(role.is_doctor()))
            .order(accounts::id.asc())
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }

    async fn count(&self, role: Option<Role>) -> Result<u64, AccountPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = match role {
            Some(role) => {
                accounts::table
                    .filter(accounts::is_doctor.eq(role.is_doctor()))
                    .count()
                    .get_result::<i64>(&mut conn)
                    .await
            }
            None => accounts::table.count().get_result::<i64>(&mut conn).await,
        }
        .map_err(map_diesel_error)?;
        u64::try_from(total).map_err(|_| AccountPersistenceError::query("negative row count"))
    }
}
