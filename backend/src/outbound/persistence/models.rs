//! Internal Diesel row structs for the employee mirror.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Employee, EmployeeId};

use super::schema::employees;

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: String,
    pub employee_name: String,
    pub employee_salary: i64,
    pub employee_age: i32,
    pub profile_image: String,
    #[expect(dead_code, reason = "audit column kept for operators, not mapped to the domain")]
    pub mirrored_at: DateTime<Utc>,
}

/// Insertable struct for upserting mirror rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub id: &'a str,
    pub employee_name: &'a str,
    pub employee_salary: i64,
    pub employee_age: i32,
    pub profile_image: &'a str,
}

/// Failure converting between rows and domain employees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("{column} value {value} is out of range")]
    OutOfRange { column: &'static str, value: String },
    #[error("stored employee id is invalid: {message}")]
    InvalidId { message: String },
}

impl<'a> TryFrom<&'a Employee> for NewEmployeeRow<'a> {
    type Error = RowConversionError;

    fn try_from(employee: &'a Employee) -> Result<Self, Self::Error> {
        let employee_salary =
            i64::try_from(employee.salary()).map_err(|_| RowConversionError::OutOfRange {
                column: "employee_salary",
                value: employee.salary().to_string(),
            })?;
        let employee_age =
            i32::try_from(employee.age()).map_err(|_| RowConversionError::OutOfRange {
                column: "employee_age",
                value: employee.age().to_string(),
            })?;
        Ok(Self {
            id: employee.id().as_ref(),
            employee_name: employee.name(),
            employee_salary,
            employee_age,
            profile_image: employee.profile_image(),
        })
    }
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RowConversionError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let id = EmployeeId::new(row.id).map_err(|err| RowConversionError::InvalidId {
            message: err.to_string(),
        })?;
        let salary =
            u64::try_from(row.employee_salary).map_err(|_| RowConversionError::OutOfRange {
                column: "employee_salary",
                value: row.employee_salary.to_string(),
            })?;
        let age = u32::try_from(row.employee_age).map_err(|_| RowConversionError::OutOfRange {
            column: "employee_age",
            value: row.employee_age.to_string(),
        })?;
        let profile_image = Some(row.profile_image).filter(|image| !image.is_empty());
        Ok(Employee::new(id, row.employee_name, salary, age).with_profile_image(profile_image))
    }
}
