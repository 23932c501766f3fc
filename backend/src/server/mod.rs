//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::{MirrorBackend, ServerConfig};
#[cfg(feature = "metrics")]
pub use metrics::prometheus_metrics;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::EmployeeSource;
use backend::inbound::http::employees;
use backend::inbound::http::error::{json_error_handler, query_error_handler};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

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
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(employees::scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server serving the employee API over `source`.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `source`: upstream employee service adapter.
/// - `config`: bind address plus optional database pool and metrics.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server<S>(
    health_state: web::Data<HealthState>,
    source: Arc<S>,
    config: ServerConfig,
) -> std::io::Result<Server>
where
    S: EmployeeSource + 'static,
{
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config, source);
    let ServerConfig {
        bind_addr,
        mirror: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
