//! PostgreSQL-backed `EmployeeMirrorRepository` implementation using Diesel.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::Employee;
use crate::domain::ports::{EmployeeMirrorRepository, EmployeeMirrorRepositoryError};

use super::models::{EmployeeRow, NewEmployeeRow, RowConversionError};
use super::pool::{DbPool, PoolError};
use super::schema::employees;

/// Diesel-backed employee mirror.
#[derive(Clone)]
pub struct DieselEmployeeMirrorRepository {
    pool: DbPool,
}

impl DieselEmployeeMirrorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmployeeMirrorRepositoryError {
    EmployeeMirrorRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> EmployeeMirrorRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EmployeeMirrorRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            EmployeeMirrorRepositoryError::query("database query error")
        }
        _ => EmployeeMirrorRepositoryError::query("database error"),
    }
}

fn map_row_error(error: RowConversionError) -> EmployeeMirrorRepositoryError {
    EmployeeMirrorRepositoryError::query(error.to_string())
}

/// Collapse repeated ids so the last occurrence wins.
///
/// PostgreSQL rejects an `ON CONFLICT DO UPDATE` statement that touches the
/// same row twice, so duplicates must be removed before the insert.
fn last_write_per_id(employees: &[Employee]) -> Vec<&Employee> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(employees.len());
    let mut unique: Vec<&Employee> = Vec::with_capacity(employees.len());
    for employee in employees {
        match positions.get(employee.id().as_ref()) {
            Some(&index) => {
                if let Some(slot) = unique.get_mut(index) {
                    *slot = employee;
                }
            }
            None => {
                positions.insert(employee.id().as_ref(), unique.len());
                unique.push(employee);
            }
        }
    }
    unique
}

#[async_trait]
impl EmployeeMirrorRepository for DieselEmployeeMirrorRepository {
    async fn upsert_all(&self, employees: &[Employee]) -> Result<(), EmployeeMirrorRepositoryError> {
        if employees.is_empty() {
            return Ok(());
        }
        let rows = last_write_per_id(employees)
            .into_iter()
            .map(NewEmployeeRow::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_row_error)?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let written = diesel::insert_into(employees::table)
            .values(&rows)
            .on_conflict(employees::id)
            .do_update()
            .set((
                employees::employee_name.eq(excluded(employees::employee_name)),
                employees::employee_salary.eq(excluded(employees::employee_salary)),
                employees::employee_age.eq(excluded(employees::employee_age)),
                employees::profile_image.eq(excluded(employees::profile_image)),
                employees::mirrored_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(written, "upserted employee mirror rows");
        Ok(())
    }

    async fn find_top_by_salary_desc(
        &self,
    ) -> Result<Option<Employee>, EmployeeMirrorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = employees::table
            .select(EmployeeRow::as_select())
            .order((employees::employee_salary.desc(), employees::id.asc()))
            .first::<EmployeeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Employee::try_from).transpose().map_err(map_row_error)
    }
}
