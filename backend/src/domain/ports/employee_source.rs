//! Driven port for the upstream employee service.
//!
//! The upstream service is the authoritative owner of employee records. The
//! domain only reads snapshots and forwards create and delete commands.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, NewEmployee};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the upstream employee service.
    pub enum EmployeeSourceError {
        /// Network transport failed before a usable response arrived.
        Transport { message: String } =>
            "employee service transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "employee service timeout: {message}",
        /// The upstream service throttled the request.
        RateLimited { message: String } =>
            "employee service rate limited request: {message}",
        /// The upstream service answered with an unexpected status.
        Status { status: u16, message: String } =>
            "employee service returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "employee service response decode failed: {message}",
        /// The upstream service rejected the request as malformed.
        InvalidRequest { message: String } =>
            "employee service rejected request: {message}",
    }
}

/// Port for reading and mutating employees held by the upstream service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    /// Fetch every employee known upstream.
    async fn fetch_all(&self) -> Result<Vec<Employee>, EmployeeSourceError>;

    /// Fetch one employee.
    ///
    /// Returns `Ok(None)` when the upstream reports the id as unknown.
    async fn fetch_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, EmployeeSourceError>;

    /// Create an employee and return the record the upstream stored.
    async fn create(&self, employee: &NewEmployee) -> Result<Employee, EmployeeSourceError>;

    /// Delete an employee by id.
    async fn delete(&self, id: &EmployeeId) -> Result<(), EmployeeSourceError>;
}

/// Fixture source that knows no employees and echoes creates back.
///
/// # Examples
/// ```
/// use backend::domain::ports::{EmployeeSource, FixtureEmployeeSource};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let employees = FixtureEmployeeSource.fetch_all().await.expect("fixture");
/// assert!(employees.is_empty());
/// # });
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeSource;

const FIXTURE_ASSIGNED_ID: &str = "1";

#[async_trait]
impl EmployeeSource for FixtureEmployeeSource {
    async fn fetch_all(&self) -> Result<Vec<Employee>, EmployeeSourceError> {
        Ok(Vec::new())
    }

    async fn fetch_by_id(
        &self,
        _id: &EmployeeId,
    ) -> Result<Option<Employee>, EmployeeSourceError> {
        Ok(None)
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, EmployeeSourceError> {
        let id = match employee.id() {
            Some(id) => id.clone(),
            None => EmployeeId::new(FIXTURE_ASSIGNED_ID)
                .map_err(|err| EmployeeSourceError::decode(err.to_string()))?,
        };
        Ok(Employee::new(
            id,
            employee.name(),
            employee.salary(),
            employee.age(),
        ))
    }

    async fn delete(&self, _id: &EmployeeId) -> Result<(), EmployeeSourceError> {
        Ok(())
    }
}
