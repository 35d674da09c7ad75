//! Startup seeding of the doctor account.
//!
//! Registration only creates patients, so the single doctor account comes
//! from here. The step is idempotent and runs on every start.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::account_service::hash_password;
use super::ports::{AccountPersistenceError, AccountRepository};
use super::{DisplayName, Email, Error, NewAccount, Password, Role};

/// Credentials for the seeded doctor.
#[derive(Debug, Clone)]
pub struct DoctorSeed {
    pub email: Email,
    pub display_name: DisplayName,
    pub password: Password,
}

/// Result of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyPresent,
}

/// Failure that aborts startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("doctor bootstrap failed: {0}")]
    Store(#[from] AccountPersistenceError),
    #[error("doctor password could not be hashed: {0}")]
    Hashing(Error),
}

/// Ensures at least one doctor-flagged account exists.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use portal::domain::ports::InMemoryAccountRepository;
/// use portal::domain::{
///     BootstrapOutcome, DisplayName, DoctorBootstrap, DoctorSeed, Email, Password,
/// };
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let seed = DoctorSeed {
///     email: Email::new("doctor@gmail.com").unwrap(),
///     display_name: DisplayName::new("Doctor").unwrap(),
///     password: Password::new("doctor").unwrap(),
/// };
/// let bootstrap = DoctorBootstrap::new(Arc::new(InMemoryAccountRepository::default()));
/// assert_eq!(bootstrap.ensure_doctor(&seed).await.unwrap(), BootstrapOutcome::Created);
/// assert_eq!(bootstrap.ensure_doctor(&seed).await.unwrap(), BootstrapOutcome::AlreadyPresent);
/// # });
/// ```
#[derive(Clone)]
pub struct DoctorBootstrap {
    accounts: Arc<dyn AccountRepository>,
}

impl DoctorBootstrap {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Insert `seed` as a doctor unless some doctor already exists.
    ///
    /// Losing an insert race on the email constraint counts as
    /// [`BootstrapOutcome::AlreadyPresent`].
    pub async fn ensure_doctor(&self, seed: &DoctorSeed) -> Result<BootstrapOutcome, BootstrapError> {
        if let Some(existing) = self.accounts.find_any_with_role(Role::Doctor).await? {
            info!(account_id = %existing.id(), "doctor account already present");
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        let password_hash = hash_password(seed.password.clone())
            .await
            .map_err(BootstrapError::Hashing)?;
        let insert = self
            .accounts
            .insert(&NewAccount {
                email: seed.email.clone(),
                display_name: seed.display_name.clone(),
                password_hash,
                role: Role::Doctor,
            })
            .await;

        match insert {
            Ok(account) => {
                info!(account_id = %account.id(), email = %seed.email, "doctor account created");
                Ok(BootstrapOutcome::Created)
            }
            Err(AccountPersistenceError::DuplicateEmail) => {
                info!(email = %seed.email, "doctor email already taken; skipping");
                Ok(BootstrapOutcome::AlreadyPresent)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{InMemoryAccountRepository, MockAccountRepository};
    use rstest::{fixture, rstest};

    #[fixture]
    fn seed() -> DoctorSeed {
        DoctorSeed {
            email: Email::new("doctor@gmail.com").expect("email"),
            display_name: DisplayName::new("Doctor").expect("name"),
            password: Password::new("doctor").expect("password"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn running_twice_leaves_one_doctor(seed: DoctorSeed) {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let bootstrap = DoctorBootstrap::new(repo.clone());

        let first = bootstrap.ensure_doctor(&seed).await.expect("first run");
        let second = bootstrap.ensure_doctor(&seed).await.expect("second run");

        assert_eq!(first, BootstrapOutcome::Created);
        assert_eq!(second, BootstrapOutcome::AlreadyPresent);
        assert_eq!(repo.count(Some(Role::Doctor)).await.expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_password_is_hashed(seed: DoctorSeed) {
        let repo = Arc::new(InMemoryAccountRepository::default());
        DoctorBootstrap::new(repo.clone())
            .ensure_doctor(&seed)
            .await
            .expect("bootstrap");
        let doctor = repo
            .find_by_email(&seed.email)
            .await
            .expect("lookup")
            .expect("doctor stored");
        assert!(doctor.role().is_doctor());
        assert_ne!(doctor.password_hash().as_ref(), "doctor");
        assert!(doctor.password_hash().verify(&seed.password).expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn lost_insert_race_is_already_present(seed: DoctorSeed) {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_any_with_role().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(AccountPersistenceError::duplicate_email()));

        let outcome = DoctorBootstrap::new(Arc::new(repo))
            .ensure_doctor(&seed)
            .await
            .expect("race is not an error");
        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_aborts(seed: DoctorSeed) {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_any_with_role()
            .returning(|_| Err(AccountPersistenceError::connection("database is locked")));

        let err = DoctorBootstrap::new(Arc::new(repo))
            .ensure_doctor(&seed)
            .await
            .expect_err("store failure must abort");
        assert!(matches!(
            err,
            BootstrapError::Store(AccountPersistenceError::Connection { .. })
        ));
    }
}
