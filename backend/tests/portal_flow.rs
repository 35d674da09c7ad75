//! End-to-end portal flows through the assembled application over SQLite.
//!
//! The app is built with the production wiring (`server::build_app`): trace
//! middleware, cookie sessions, and the Diesel account store. Only the
//! transcription service is replaced by a fixture.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{test, web};
use portal::domain::ports::{AccountRepository, FixtureTranscriptionSource};
use portal::domain::{
    BootstrapOutcome, DisplayName, DoctorBootstrap, DoctorSeed, Email, Password, Role,
    TRACE_ID_HEADER,
};
use portal::inbound::http::health::HealthState;
use portal::inbound::http::session_config::SessionSettings;
use portal::outbound::persistence::{DbPool, DieselAccountRepository, PoolConfig, run_migrations};
use portal::server::{AppDependencies, ServerConfig, build_app, build_http_state};
use rstest::rstest;
use serde_json::Value;
use tempfile::TempDir;

struct Portal {
    accounts: Arc<dyn AccountRepository>,
    deps: AppDependencies,
    _dir: TempDir,
}

fn doctor_seed() -> DoctorSeed {
    DoctorSeed {
        email: Email::new("doctor@gmail.com").expect("email"),
        display_name: DisplayName::new("Doctor").expect("name"),
        password: Password::new("doctor").expect("password"),
    }
}

async fn portal() -> Portal {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("portal.sqlite3").to_string_lossy().into_owned();
    run_migrations(&path).await.expect("migrations");
    let pool = DbPool::new(PoolConfig::new(path)).await.expect("pool");
    let accounts: Arc<dyn AccountRepository> = Arc::new(DieselAccountRepository::new(pool));

    DoctorBootstrap::new(accounts.clone())
        .ensure_doctor(&doctor_seed())
        .await
        .expect("bootstrap");

    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    let http_state = build_http_state(
        accounts.clone(),
        Arc::new(FixtureTranscriptionSource {
            text: "no acute distress".to_owned(),
        }),
    );
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let config = ServerConfig::new(
        "127.0.0.1:0".parse().expect("addr"),
        session,
        Duration::from_secs(2 * 60 * 60),
    );
    Portal {
        accounts,
        deps: AppDependencies {
            health_state,
            http_state: web::Data::new(http_state),
            config,
        },
        _dir: dir,
    }
}

fn cookie_from<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Browser-like client that keeps the latest session cookie.
struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

impl<S> Browser<S>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    async fn send(&mut self, req: test::TestRequest) -> ServiceResponse {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let res = test::call_service(&self.app, req.to_request()).await;
        if let Some(cookie) = cookie_from(&res) {
            self.cookie = Some(cookie);
        }
        res
    }

    async fn get(&mut self, path: &str) -> ServiceResponse {
        self.send(test::TestRequest::get().uri(path)).await
    }

    async fn post_form(&mut self, path: &str, body: &str) -> ServiceResponse {
        self.send(
            test::TestRequest::post()
                .uri(path)
                .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
                .set_payload(body.to_owned()),
        )
        .await
    }

    async fn page(&mut self, path: &str) -> Value {
        let res = self.get(path).await;
        assert_eq!(res.status(), StatusCode::OK, "GET {path}");
        test::read_body_json(res).await
    }
}

fn last_flash(page: &Value) -> (String, String) {
    let flash = page["flashes"]
        .as_array()
        .and_then(|flashes| flashes.last())
        .expect("a flash message");
    (
        flash["category"].as_str().unwrap_or_default().to_owned(),
        flash["message"].as_str().unwrap_or_default().to_owned(),
    )
}

#[rstest]
#[actix_web::test]
async fn bootstrap_is_idempotent() {
    let portal = portal().await;
    let again = DoctorBootstrap::new(portal.accounts.clone())
        .ensure_doctor(&doctor_seed())
        .await
        .expect("second bootstrap");
    assert_eq!(again, BootstrapOutcome::AlreadyPresent);
    assert_eq!(
        portal.accounts.count(Some(Role::Doctor)).await.expect("count"),
        1
    );
}

#[rstest]
#[actix_web::test]
async fn patient_registers_logs_in_and_out() {
    let portal = portal().await;
    let app = test::init_service(build_app(portal.deps.clone())).await;
    let mut browser = Browser { app, cookie: None };

    let res = browser
        .post_form("/register", "full_name=Ada+Lovelace&email=ada%40example.com&password=engine")
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");

    let stored = portal
        .accounts
        .find_by_email(&Email::new("ada@example.com").expect("email"))
        .await
        .expect("lookup")
        .expect("registered account");
    assert_eq!(stored.role(), Role::Patient);
    assert_ne!(stored.password_hash().as_ref(), "engine");
    assert!(
        stored
            .password_hash()
            .verify(&Password::new("engine").expect("password"))
            .expect("verify")
    );

    let res = browser
        .post_form("/register", "full_name=Again&email=ada%40example.com&password=other")
        .await;
    assert_eq!(location(&res), "/register");
    assert_eq!(portal.accounts.count(None).await.expect("count"), 2);
    let register_page = browser.page("/register").await;
    assert_eq!(
        last_flash(&register_page),
        ("message".to_owned(), "Email already exists!".to_owned())
    );

    let res = browser
        .post_form("/login", "email=ada%40example.com&password=engine")
        .await;
    assert_eq!(location(&res), "/patient_dashboard");
    let dashboard = browser.page("/patient_dashboard").await;
    assert_eq!(dashboard["account"]["role"], "patient");

    let res = browser.get("/doctor_dashboard").await;
    assert_eq!(location(&res), "/login");
    let login_page = browser.page("/login").await;
    assert_eq!(
        last_flash(&login_page),
        ("danger".to_owned(), "Unauthorized".to_owned())
    );

    let res = browser.get("/logout").await;
    assert_eq!(location(&res), "/login");
    for path in ["/patient_dashboard", "/doctor_dashboard"] {
        let res = browser.get(path).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path} after logout");
        assert_eq!(location(&res), "/login");
    }
}

#[rstest]
#[actix_web::test]
async fn seeded_doctor_reaches_only_the_doctor_dashboard() {
    let portal = portal().await;
    let app = test::init_service(build_app(portal.deps.clone())).await;
    let mut browser = Browser { app, cookie: None };

    let res = browser
        .post_form("/login", "email=doctor%40gmail.com&password=doctor")
        .await;
    assert_eq!(location(&res), "/doctor_dashboard");
    let dashboard = browser.page("/doctor_dashboard").await;
    assert_eq!(dashboard["title"], "Doctor Dashboard");
    assert_eq!(
        last_flash(&dashboard),
        ("success".to_owned(), "Login successful!".to_owned())
    );

    let res = browser.get("/patient_dashboard").await;
    assert_eq!(location(&res), "/login");
}

#[rstest]
#[actix_web::test]
async fn wrong_password_leaves_session_anonymous() {
    let portal = portal().await;
    let app = test::init_service(build_app(portal.deps.clone())).await;
    let mut browser = Browser { app, cookie: None };

    let res = browser
        .post_form("/login", "email=doctor%40gmail.com&password=nurse")
        .await;
    assert_eq!(location(&res), "/login");
    let login_page = browser.page("/login").await;
    assert_eq!(
        last_flash(&login_page),
        (
            "error".to_owned(),
            "Invalid credentials. Please try again.".to_owned()
        )
    );
    let res = browser.get("/doctor_dashboard").await;
    assert_eq!(location(&res), "/login");
}

#[rstest]
#[case("/")]
#[case("/achievements")]
#[case("/health/ready")]
#[actix_web::test]
async fn responses_carry_a_trace_id(#[case] path: &str) {
    let portal = portal().await;
    let app = test::init_service(build_app(portal.deps.clone())).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
    assert!(res.headers().contains_key(TRACE_ID_HEADER), "{path}");
}

#[rstest]
#[actix_web::test]
async fn transcription_demo_reports_statistics() {
    let portal = portal().await;
    let app = test::init_service(build_app(portal.deps.clone())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/transcribe?filename=Visit.MP3")
            .insert_header((header::CONTENT_TYPE, "audio/mpeg"))
            .set_payload(&b"ID3"[..])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let report: Value = test::read_body_json(res).await;
    assert_eq!(report["wordCount"], 3);
    assert_eq!(report["characterCount"], 17);
    assert_eq!(report["downloadName"], "Visit_MP3.txt");
}

#[rstest]
#[actix_web::test]
async fn transcript_history_lives_in_the_session() {
    let portal = portal().await;
    let app = test::init_service(build_app(portal.deps.clone())).await;
    let mut browser = Browser { app, cookie: None };

    let res = browser
        .post_form("/transcribe/history", "file_name=Visit.MP3&text=no+acute+distress")
        .await;
    assert_eq!(location(&res), "/transcribe/history");
    let history = browser.page("/transcribe/history").await;
    assert_eq!(history["entries"][0]["fileName"], "Visit.MP3");
    assert_eq!(history["entries"][0]["text"], "no acute distress");
    assert_eq!(
        last_flash(&history),
        ("success".to_owned(), "Transcript saved.".to_owned())
    );

    browser.get("/logout").await;
    let history = browser.page("/transcribe/history").await;
    assert_eq!(history["entries"], serde_json::json!([]));
}
