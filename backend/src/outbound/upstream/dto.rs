//! DTOs for the upstream employee service's JSON payloads.
//!
//! Responses are decoded into these transport types first, then mapped into
//! domain employees in one pass. Decoding is lenient about scalar encodings:
//! ids arrive as strings or integers, salaries and ages as integers or numeric
//! strings.

use serde::{Deserialize, Serialize};

use crate::domain::{Employee, EmployeeId, NewEmployee};

/// Response envelope: `{ "status": .., "data": .., "message": .. }`.
#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto {
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) data: Option<DataDto>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

/// `data` holds an array, a single record, or nothing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum DataDto {
    Many(Vec<EmployeeDto>),
    One(Box<EmployeeDto>),
}

/// Create responses arrive either wrapped in an envelope or as a bare record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum CreateResponseDto {
    Bare(EmployeeDto),
    Envelope(EnvelopeDto),
}

#[derive(Debug, Deserialize)]
pub(super) struct EmployeeDto {
    id: ScalarDto,
    #[serde(rename = "employee_name", alias = "name")]
    name: String,
    #[serde(rename = "employee_salary", alias = "salary")]
    salary: ScalarDto,
    #[serde(rename = "employee_age", alias = "age")]
    age: ScalarDto,
    #[serde(default)]
    profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarDto {
    Integer(i64),
    Text(String),
}

impl ScalarDto {
    fn into_text(self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }

    fn parse<T>(self, field: &str) -> Result<T, String>
    where
        T: std::str::FromStr + TryFrom<i64>,
    {
        match self {
            Self::Integer(value) => {
                T::try_from(value).map_err(|_| format!("{field} {value} is out of range"))
            }
            Self::Text(value) => value
                .trim()
                .parse::<T>()
                .map_err(|_| format!("{field} {value:?} is not a non-negative integer")),
        }
    }
}

impl EnvelopeDto {
    pub(super) fn into_domain_employees(self) -> Result<Vec<Employee>, String> {
        match self.data {
            Some(DataDto::Many(records)) => records
                .into_iter()
                .map(EmployeeDto::into_domain_employee)
                .collect(),
            Some(DataDto::One(record)) => Ok(vec![record.into_domain_employee()?]),
            None => Ok(Vec::new()),
        }
    }

    /// Short description of a non-success envelope, if it is one.
    pub(super) fn failure_summary(&self) -> Option<String> {
        let status = self.status.as_deref()?;
        if status.eq_ignore_ascii_case("success") {
            return None;
        }
        Some(match self.message.as_deref() {
            Some(message) => format!("{status}: {message}"),
            None => status.to_owned(),
        })
    }
}

impl EmployeeDto {
    pub(super) fn into_domain_employee(self) -> Result<Employee, String> {
        let id = EmployeeId::new(self.id.into_text()).map_err(|err| err.to_string())?;
        let salary = self.salary.parse::<u64>("employee_salary")?;
        let age = self.age.parse::<u32>("employee_age")?;
        Ok(Employee::new(id, self.name, salary, age).with_profile_image(self.profile_image))
    }
}

impl CreateResponseDto {
    pub(super) fn into_domain_employee(self) -> Result<Employee, String> {
        match self {
            Self::Bare(record) => record.into_domain_employee(),
            Self::Envelope(envelope) => {
                if let Some(summary) = envelope.failure_summary() {
                    return Err(format!("create rejected: {summary}"));
                }
                envelope
                    .into_domain_employees()?
                    .into_iter()
                    .next()
                    .ok_or_else(|| "create response carried no employee".to_owned())
            }
        }
    }
}

/// Request body for the upstream create endpoint.
#[derive(Debug, Serialize)]
pub(super) struct CreateEmployeeBodyDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    employee_name: &'a str,
    employee_salary: u64,
    employee_age: u32,
}

impl<'a> From<&'a NewEmployee> for CreateEmployeeBodyDto<'a> {
    fn from(value: &'a NewEmployee) -> Self {
        Self {
            id: value.id().map(AsRef::as_ref),
            employee_name: value.name(),
            employee_salary: value.salary(),
            employee_age: value.age(),
        }
    }
}
