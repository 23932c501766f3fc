//! Port for the local employee mirror.
//!
//! The mirror keeps a copy of every employee list fetched successfully from
//! upstream. Writes are keyed upserts; deletes are never mirrored.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee mirror adapters.
    pub enum EmployeeMirrorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "employee mirror connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee mirror query failed: {message}",
    }
}

/// Keyed store of mirrored employee records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeMirrorRepository: Send + Sync {
    /// Insert or replace every record, keyed by id.
    ///
    /// Later entries win when the slice repeats an id. An empty slice is a
    /// no-op.
    async fn upsert_all(&self, employees: &[Employee]) -> Result<(), EmployeeMirrorRepositoryError>;

    /// Return the mirrored record with the highest salary.
    ///
    /// Ties resolve to the smallest id.
    async fn find_top_by_salary_desc(
        &self,
    ) -> Result<Option<Employee>, EmployeeMirrorRepositoryError>;
}

/// Process-local mirror used when no database is configured.
///
/// # Examples
/// ```
/// use backend::domain::ports::{EmployeeMirrorRepository, InMemoryEmployeeMirror};
/// use backend::domain::{Employee, EmployeeId};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mirror = InMemoryEmployeeMirror::default();
/// let alice = Employee::new(EmployeeId::new("1").expect("id"), "Alice", 5000, 30);
/// mirror.upsert_all(&[alice.clone()]).await.expect("upsert");
/// assert_eq!(mirror.find_top_by_salary_desc().await.expect("query"), Some(alice));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEmployeeMirror {
    rows: RwLock<BTreeMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeMirror {
    /// Number of mirrored records.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or_default()
    }

    /// Whether nothing has been mirrored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up one mirrored record.
    pub fn get(&self, id: &EmployeeId) -> Option<Employee> {
        self.rows
            .read()
            .ok()
            .and_then(|rows| rows.get(id).cloned())
    }
}

#[async_trait]
impl EmployeeMirrorRepository for InMemoryEmployeeMirror {
    async fn upsert_all(&self, employees: &[Employee]) -> Result<(), EmployeeMirrorRepositoryError> {
        if employees.is_empty() {
            return Ok(());
        }
        let mut rows = self
            .rows
            .write()
            .map_err(|_| EmployeeMirrorRepositoryError::query("mirror lock poisoned"))?;
        for employee in employees {
            rows.insert(employee.id().clone(), employee.clone());
        }
        Ok(())
    }

    async fn find_top_by_salary_desc(
        &self,
    ) -> Result<Option<Employee>, EmployeeMirrorRepositoryError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| EmployeeMirrorRepositoryError::query("mirror lock poisoned"))?;
        // BTreeMap iterates in ascending id order, so the first maximum wins ties.
        let top = rows.values().fold(None::<&Employee>, |best, candidate| match best {
            Some(current) if current.salary() >= candidate.salary() => Some(current),
            _ => Some(candidate),
        });
        Ok(top.cloned())
    }
}
