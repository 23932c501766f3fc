//! Driving port for employee queries and commands.
//!
//! Inbound adapters call this port without knowing about the upstream service
//! or the mirror. Read operations never fail: upstream trouble degrades to an
//! empty or absent result. Commands surface failures as domain errors.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, Error, NewEmployee};

/// Use-case port for the employee directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Every employee known upstream; mirrored on success.
    async fn list_employees(&self) -> Vec<Employee>;

    /// Employees whose name contains `needle`, ignoring case.
    async fn search_employees(&self, needle: &str) -> Vec<Employee>;

    /// One employee, or `None` when unknown or unreachable.
    async fn employee_by_id(&self, id: &EmployeeId) -> Option<Employee>;

    /// Highest salary across all employees.
    async fn highest_salary(&self) -> Option<u64>;

    /// Names of the ten best-paid employees, best first, without duplicates.
    async fn top_earner_names(&self) -> Vec<String>;

    /// Create an employee upstream and return the stored record.
    async fn create_employee(&self, employee: NewEmployee) -> Result<Employee, Error>;

    /// Delete an employee upstream and return the name it had.
    async fn delete_employee(&self, id: &EmployeeId) -> Result<String, Error>;
}

/// Fixture directory with no employees.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeDirectory;

#[async_trait]
impl EmployeeDirectory for FixtureEmployeeDirectory {
    async fn list_employees(&self) -> Vec<Employee> {
        Vec::new()
    }

    async fn search_employees(&self, _needle: &str) -> Vec<Employee> {
        Vec::new()
    }

    async fn employee_by_id(&self, _id: &EmployeeId) -> Option<Employee> {
        None
    }

    async fn highest_salary(&self) -> Option<u64> {
        None
    }

    async fn top_earner_names(&self) -> Vec<String> {
        Vec::new()
    }

    async fn create_employee(&self, _employee: NewEmployee) -> Result<Employee, Error> {
        Err(Error::internal("fixture directory cannot create employees"))
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<String, Error> {
        Err(Error::not_found(format!("employee {id} not found")))
    }
}
