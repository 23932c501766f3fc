//! OpenAPI documentation for the employee API.
//!
//! [`ApiDoc`] gathers the employee and health endpoints together with the
//! payload schemas. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::{Employee, EmployeeId, Error, ErrorCode};
use crate::inbound::http::employees::CreateEmployeeRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee directory API",
        description = "Employee lookup, search, ranking and lifecycle operations backed by an upstream employee service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::search_employees,
        crate::inbound::http::employees::highest_salary,
        crate::inbound::http::employees::top_earner_names,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Employee, EmployeeId, CreateEmployeeRequest, Error, ErrorCode)),
    tags(
        (name = "employees", description = "Employee directory operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
