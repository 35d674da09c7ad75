//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::auth::{login, login_page, logout, register, register_page};
use crate::inbound::http::dashboards::{doctor_dashboard, patient_dashboard};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::pages::{configure_placeholders, index};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::transcribe;
use crate::middleware::Trace;

/// Shared pieces cloned into every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub config: ServerConfig,
}

/// Build the application: tracing outermost, then the cookie session, then
/// the portal routes.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        config,
    } = deps;
    let session = config.session.middleware(config.session_ttl);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .service(index)
        .service(register_page)
        .service(register)
        .service(login_page)
        .service(login)
        .service(logout)
        .service(doctor_dashboard)
        .service(patient_dashboard)
        .configure(transcribe::configure)
        .configure(configure_placeholders);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and mark the service ready.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let bind_addr = config.bind_addr();
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        config,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
