//! Employee directory domain service.
//!
//! Implements the [`EmployeeDirectory`] driving port on top of the upstream
//! [`EmployeeSource`] and the [`EmployeeMirrorRepository`]. Every read fetches
//! fresh data from upstream; only the full listing is written to the mirror.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    EmployeeDirectory, EmployeeMirrorRepository, EmployeeSource, EmployeeSourceError,
};
use crate::domain::{Employee, EmployeeId, Error, NewEmployee};

/// Maximum number of names returned by [`top_earner_names_of`].
pub const TOP_EARNER_LIMIT: usize = 10;

/// Employee directory service implementing the driving port.
#[derive(Clone)]
pub struct EmployeeDirectoryService<S, M> {
    source: Arc<S>,
    mirror: Arc<M>,
}

impl<S, M> EmployeeDirectoryService<S, M> {
    /// Create a new service over the given upstream source and mirror.
    pub fn new(source: Arc<S>, mirror: Arc<M>) -> Self {
        Self { source, mirror }
    }
}

impl<S, M> EmployeeDirectoryService<S, M>
where
    S: EmployeeSource,
    M: EmployeeMirrorRepository,
{
    async fn fetch_all_or_empty(&self, operation: &'static str) -> Vec<Employee> {
        match self.source.fetch_all().await {
            Ok(employees) => employees,
            Err(error) => {
                warn!(operation, %error, "upstream employee fetch failed; returning empty result");
                Vec::new()
            }
        }
    }

    fn map_command_error(operation: &'static str, error: &EmployeeSourceError) -> Error {
        warn!(operation, %error, "upstream employee command failed");
        if error.is_rate_limited() {
            Error::too_many_requests("employee service rate limited the request")
        } else {
            Error::internal(format!("failed to {operation}"))
        }
    }
}

#[async_trait]
impl<S, M> EmployeeDirectory for EmployeeDirectoryService<S, M>
where
    S: EmployeeSource,
    M: EmployeeMirrorRepository,
{
    async fn list_employees(&self) -> Vec<Employee> {
        let employees = match self.source.fetch_all().await {
            Ok(employees) => employees,
            Err(error) => {
                warn!(operation = "list employees", %error, "upstream employee fetch failed");
                return Vec::new();
            }
        };

        if employees.is_empty() {
            return employees;
        }
        if let Err(error) = self.mirror.upsert_all(&employees).await {
            warn!(operation = "list employees", %error, "employee mirror upsert failed");
            return Vec::new();
        }
        debug!(count = employees.len(), "mirrored employee listing");
        employees
    }

    async fn search_employees(&self, needle: &str) -> Vec<Employee> {
        let employees = self.fetch_all_or_empty("search employees").await;
        filter_by_name(employees, needle)
    }

    async fn employee_by_id(&self, id: &EmployeeId) -> Option<Employee> {
        match self.source.fetch_by_id(id).await {
            Ok(Some(employee)) if employee.id() == id => Some(employee),
            Ok(Some(employee)) => {
                debug!(requested = %id, returned = %employee.id(), "upstream returned a different employee");
                None
            }
            Ok(None) => None,
            Err(error) => {
                warn!(operation = "get employee", employee_id = %id, %error, "upstream employee lookup failed");
                None
            }
        }
    }

    async fn highest_salary(&self) -> Option<u64> {
        let employees = self.fetch_all_or_empty("highest salary").await;
        highest_salary_of(&employees)
    }

    async fn top_earner_names(&self) -> Vec<String> {
        let employees = self.fetch_all_or_empty("top earners").await;
        top_earner_names_of(employees)
    }

    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, Error> {
        self.source
            .create(&employee)
            .await
            .map_err(|error| Self::map_command_error("create employee", &error))
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<String, Error> {
        let Some(existing) = self.employee_by_id(id).await else {
            warn!(operation = "delete employee", employee_id = %id, "employee not found; nothing deleted");
            return Err(Error::not_found(format!("employee {id} not found")));
        };
        self.source
            .delete(id)
            .await
            .map_err(|error| Self::map_command_error("delete employee", &error))?;
        Ok(existing.name().to_owned())
    }
}

/// Keep employees whose name contains `needle`, ignoring case.
///
/// An empty needle keeps everything.
///
/// # Examples
/// ```
/// use backend::domain::employee_directory_service::filter_by_name;
/// use backend::domain::{Employee, EmployeeId};
///
/// let staff = vec![
///     Employee::new(EmployeeId::new("1").expect("id"), "Alice", 5000, 30),
///     Employee::new(EmployeeId::new("2").expect("id"), "Bob", 9000, 40),
/// ];
/// let found = filter_by_name(staff, "ALI");
/// assert_eq!(found.len(), 1);
/// ```
pub fn filter_by_name(employees: Vec<Employee>, needle: &str) -> Vec<Employee> {
    if needle.is_empty() {
        return employees;
    }
    let needle = needle.to_lowercase();
    employees
        .into_iter()
        .filter(|employee| employee.name().to_lowercase().contains(&needle))
        .collect()
}

/// Highest salary in the slice, or `None` when empty.
pub fn highest_salary_of(employees: &[Employee]) -> Option<u64> {
    employees.iter().map(Employee::salary).max()
}

/// Names of the best-paid employees, best first.
///
/// Sorting is stable, so equal salaries keep their input order. Repeated
/// names keep only their first occurrence and at most [`TOP_EARNER_LIMIT`]
/// names are returned.
pub fn top_earner_names_of(mut employees: Vec<Employee>) -> Vec<String> {
    employees.sort_by(|a, b| b.salary().cmp(&a.salary()));
    let mut seen = HashSet::new();
    employees
        .into_iter()
        .map(|employee| employee.name().to_owned())
        .filter(|name| seen.insert(name.clone()))
        .take(TOP_EARNER_LIMIT)
        .collect()
}

#[cfg(test)]
#[path = "employee_directory_service_tests.rs"]
mod tests;
