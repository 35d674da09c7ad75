//! Regression coverage for registration and login.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{InMemoryAccountRepository, MockAccountRepository};
use crate::domain::{DisplayName, Email, ErrorCode};

struct Harness {
    repo: Arc<InMemoryAccountRepository>,
    service: AccountService,
}

#[fixture]
fn harness() -> Harness {
    let repo = Arc::new(InMemoryAccountRepository::default());
    let service = AccountService::new(repo.clone());
    Harness { repo, service }
}

fn registration(email: &str, password: &str) -> Registration {
    Registration::try_from_parts("Ada Lovelace", email, password).expect("valid registration")
}

fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("valid credentials")
}

#[rstest]
#[tokio::test]
async fn registration_creates_patient_with_hashed_password(harness: Harness) {
    let id = harness
        .service
        .register(&registration("ada@example.com", "s3cret"))
        .await
        .expect("registration succeeds");

    let stored = harness
        .repo
        .find_by_email(&Email::new("ada@example.com").expect("email"))
        .await
        .expect("lookup")
        .expect("account stored");
    assert_eq!(stored.id(), id);
    assert_eq!(stored.role(), Role::Patient);
    assert_ne!(stored.password_hash().as_ref(), "s3cret");
    assert!(
        stored
            .password_hash()
            .verify(&Password::new("s3cret").expect("password"))
            .expect("verify")
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_registration_leaves_count_unchanged(harness: Harness) {
    harness
        .service
        .register(&registration("ada@example.com", "one"))
        .await
        .expect("first registration");
    let err = harness
        .service
        .register(&registration("ada@example.com", "two"))
        .await
        .expect_err("duplicate must fail");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
    assert_eq!(harness.repo.count(None).await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn unique_violation_on_insert_is_a_conflict() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email().returning(|_| Ok(None));
    repo.expect_insert()
        .returning(|_| Err(AccountPersistenceError::duplicate_email()));
    let service = AccountService::new(Arc::new(repo));

    let err = service
        .register(&registration("race@example.com", "pw"))
        .await
        .expect_err("racing insert must fail");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[case(Role::Patient)]
#[case(Role::Doctor)]
#[tokio::test]
async fn login_returns_role_of_stored_account(harness: Harness, #[case] role: Role) {
    let stored = harness
        .repo
        .insert(&NewAccount {
            email: Email::new("who@example.com").expect("email"),
            display_name: DisplayName::new("Who").expect("name"),
            password_hash: Password::new("pw").expect("password").hash().expect("hash"),
            role,
        })
        .await
        .expect("insert");

    let auth = harness
        .service
        .authenticate(&credentials(" who@example.com ", "pw"))
        .await
        .expect("login succeeds");
    assert_eq!(auth, AuthenticatedAccount { id: stored.id(), role });
}

#[rstest]
#[case("ada@example.com", "wrong")]
#[case("nobody@example.com", "s3cret")]
#[case("ADA@example.com", "s3cret")]
#[tokio::test]
async fn failed_login_is_generic(harness: Harness, #[case] email: &str, #[case] password: &str) {
    harness
        .service
        .register(&registration("ada@example.com", "s3cret"))
        .await
        .expect("registration");

    let err = harness
        .service
        .authenticate(&credentials(email, password))
        .await
        .expect_err("login must fail");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
}

#[rstest]
#[case(AccountPersistenceError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
#[case(AccountPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn store_failures_surface_as_errors(
    #[case] failure: AccountPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email()
        .returning(move |_| Err(failure.clone()));
    let service = AccountService::new(Arc::new(repo));

    let err = service
        .authenticate(&credentials("a@b.c", "pw"))
        .await
        .expect_err("store failure must propagate");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn connection_details_do_not_reach_clients() {
    let mut repo = MockAccountRepository::new();
    repo.expect_find_by_email().returning(|_| {
        Err(AccountPersistenceError::connection(
            "bb8 checkout timed out for /var/lib/portal.sqlite3",
        ))
    });
    let service = AccountService::new(Arc::new(repo));

    let err = service
        .register(&registration("new@example.com", "pw"))
        .await
        .expect_err("store failure must propagate");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(err.message(), STORE_UNAVAILABLE_MESSAGE);
}
