//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use employee_directory::Trace;
#[cfg(debug_assertions)]
use employee_directory::doc::ApiDoc;
use employee_directory::domain::EmployeeDirectoryService;
use employee_directory::inbound::http::employees;
use employee_directory::inbound::http::health::{HealthState, live, ready};
use employee_directory::inbound::http::state::HttpState;
use employee_directory::outbound::employee_api::ReqwestEmployeeUpstream;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1").configure(employees::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: validated [`ServerConfig`] holding the upstream URL, timeout and bind address.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the upstream client cannot be built or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        upstream_url,
        bind_addr,
        request_timeout,
    } = config;

    let upstream = ReqwestEmployeeUpstream::new(upstream_url, request_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to build upstream client: {e}")))?;
    info!(
        upstream = %upstream.base_url(),
        timeout_secs = request_timeout.as_secs(),
        "upstream employee directory configured"
    );
    let service = Arc::new(EmployeeDirectoryService::new(Arc::new(upstream)));
    let http_state = web::Data::new(HttpState::from_service(service));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "employee directory listening");
    health_state.mark_ready();
    Ok(server)
}
