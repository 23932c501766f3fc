//! Employee API handlers.
//!
//! ```text
//! GET    /api/v1/employee/employees
//! GET    /api/v1/employee/search?searchString=ali
//! GET    /api/v1/employee/highestSalary
//! GET    /api/v1/employee/topTenHighestEarning
//! GET    /api/v1/employee/{id}
//! POST   /api/v1/employee/create {"name":"Alice","salary":"5000","age":"30"}
//! DELETE /api/v1/employee/delete/{id}
//! ```
//!
//! The literal routes must be registered before `/{id}`; [`scope`] does that.

use actix_web::{HttpResponse, Scope, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Employee, EmployeeId, EmployeeValidationError, Error, NewEmployee};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Path prefix shared by every employee route.
pub const EMPLOYEE_SCOPE: &str = "/api/v1/employee";

/// Request body for `POST /api/v1/employee/create`.
///
/// Numeric fields arrive as strings and are validated before any upstream
/// call is made.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployeeRequest {
    /// Optional caller-chosen id; upstream assigns one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "42")]
    pub id: Option<String>,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "5000")]
    pub salary: String,
    #[schema(example = "30")]
    pub age: String,
}

impl TryFrom<CreateEmployeeRequest> for NewEmployee {
    type Error = EmployeeValidationError;

    fn try_from(value: CreateEmployeeRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.id.as_deref(), &value.name, &value.salary, &value.age)
    }
}

/// Query string for the name search endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the employee name; may be empty.
    #[serde(rename = "searchString")]
    pub search_string: String,
}

fn map_validation_error(operation: &'static str, err: &EmployeeValidationError) -> Error {
    warn!(operation, field = err.field(), error = %err, "rejected invalid employee request");
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

fn parse_employee_id(operation: &'static str, raw: String) -> ApiResult<EmployeeId> {
    EmployeeId::new(raw).map_err(|err| map_validation_error(operation, &err))
}

/// Register every employee route under [`EMPLOYEE_SCOPE`] in matching order.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::employees;
///
/// let app = App::new().service(employees::scope());
/// ```
pub fn scope() -> Scope {
    web::scope(EMPLOYEE_SCOPE)
        .service(list_employees)
        .service(search_employees)
        .service(highest_salary)
        .service(top_earner_names)
        .service(create_employee)
        .service(delete_employee)
        .service(get_employee)
}

/// List every employee known upstream.
///
/// Upstream failures degrade to an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/employee/employees",
    responses(
        (status = 200, description = "Employees", body = [Employee]),
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(state: web::Data<HttpState>) -> web::Json<Vec<Employee>> {
    web::Json(state.employees.list_employees().await)
}

/// Search employees by name fragment, ignoring case.
#[utoipa::path(
    get,
    path = "/api/v1/employee/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching employees", body = [Employee]),
        (status = 400, description = "Missing searchString parameter", body = Error),
    ),
    tags = ["employees"],
    operation_id = "searchEmployees"
)]
#[get("/search")]
pub async fn search_employees(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> web::Json<Vec<Employee>> {
    web::Json(state.employees.search_employees(&query.search_string).await)
}

/// Highest salary across all employees, or `null` when unknown.
#[utoipa::path(
    get,
    path = "/api/v1/employee/highestSalary",
    responses(
        (status = 200, description = "Highest salary, or null when unknown", body = u64),
    ),
    tags = ["employees"],
    operation_id = "highestSalary"
)]
#[get("/highestSalary")]
pub async fn highest_salary(state: web::Data<HttpState>) -> web::Json<Option<u64>> {
    web::Json(state.employees.highest_salary().await)
}

/// Names of the ten best-paid employees, best first.
#[utoipa::path(
    get,
    path = "/api/v1/employee/topTenHighestEarning",
    responses(
        (status = 200, description = "Employee names", body = [String]),
    ),
    tags = ["employees"],
    operation_id = "topTenHighestEarning"
)]
#[get("/topTenHighestEarning")]
pub async fn top_earner_names(state: web::Data<HttpState>) -> web::Json<Vec<String>> {
    web::Json(state.employees.top_earner_names().await)
}

/// Fetch one employee.
#[utoipa::path(
    get,
    path = "/api/v1/employee/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown employee", body = Error),
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let id = parse_employee_id("get employee", path.into_inner())?;
    state
        .employees
        .employee_by_id(&id)
        .await
        .map(web::Json)
        .ok_or_else(|| {
            debug!(operation = "get employee", employee_id = %id, "employee not found");
            Error::not_found(format!("employee {id} not found"))
        })
}

/// Create an employee upstream.
#[utoipa::path(
    post,
    path = "/api/v1/employee/create",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 200, description = "Created employee", body = Employee),
        (status = 400, description = "Invalid request", body = Error),
        (status = 429, description = "Upstream rate limited the request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/create")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<CreateEmployeeRequest>,
) -> ApiResult<web::Json<Employee>> {
    let draft = NewEmployee::try_from(payload.into_inner())
        .map_err(|err| map_validation_error("create employee", &err))?;
    let created = state.employees.create_employee(draft).await?;
    Ok(web::Json(created))
}

/// Delete an employee upstream and confirm by name.
#[utoipa::path(
    delete,
    path = "/api/v1/employee/delete/{id}",
    params(("id" = String, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Confirmation message", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown employee", body = Error),
        (status = 429, description = "Upstream rate limited the request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/delete/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_employee_id("delete employee", path.into_inner())?;
    let name = state.employees.delete_employee(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Employee {name} deleted successfully")))
}

#[cfg(test)]
mod tests;
