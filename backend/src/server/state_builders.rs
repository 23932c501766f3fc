//! Wiring of the employee directory service behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use backend::domain::EmployeeDirectoryService;
use backend::domain::ports::{EmployeeDirectory, EmployeeSource, InMemoryEmployeeMirror};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselEmployeeMirrorRepository;

use super::{MirrorBackend, ServerConfig};

/// Build the directory service over `source`, mirroring into PostgreSQL when a
/// pool is configured and into process memory otherwise.
pub(crate) fn build_employee_directory<S>(
    config: &ServerConfig,
    source: Arc<S>,
) -> Arc<dyn EmployeeDirectory>
where
    S: EmployeeSource + 'static,
{
    let mirror = config.mirror();
    info!(mirror = mirror.label(), "employee mirror configured");
    match mirror {
        MirrorBackend::Postgres(pool) => Arc::new(EmployeeDirectoryService::new(
            source,
            Arc::new(DieselEmployeeMirrorRepository::new(pool.clone())),
        )),
        MirrorBackend::Memory => Arc::new(EmployeeDirectoryService::new(
            source,
            Arc::new(InMemoryEmployeeMirror::default()),
        )),
    }
}

/// Wrap the employee directory in shared HTTP state.
pub(crate) fn build_http_state<S>(config: &ServerConfig, source: Arc<S>) -> web::Data<HttpState>
where
    S: EmployeeSource + 'static,
{
    web::Data::new(HttpState::new(build_employee_directory(config, source)))
}
