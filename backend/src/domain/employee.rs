//! Employee data model.
//!
//! Employees are owned by the upstream employee service; this crate only ever
//! holds immutable snapshots of them. The JSON field names are part of the
//! public contract and match the upstream service exactly.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised while constructing employee values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyId,
    IdSurroundingWhitespace,
    EmptyName,
    InvalidSalary { value: String },
    InvalidAge { value: String },
}

impl EmployeeValidationError {
    /// Name of the input field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::IdSurroundingWhitespace => "id",
            Self::EmptyName => "name",
            Self::InvalidSalary { .. } => "salary",
            Self::InvalidAge { .. } => "age",
        }
    }

    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::IdSurroundingWhitespace => "invalid_id",
            Self::EmptyName => "empty_name",
            Self::InvalidSalary { .. } => "invalid_salary",
            Self::InvalidAge { .. } => "invalid_age",
        }
    }
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "employee id must not be empty"),
            Self::IdSurroundingWhitespace => {
                write!(f, "employee id must not have surrounding whitespace")
            }
            Self::EmptyName => write!(f, "employee name must not be empty"),
            Self::InvalidSalary { value } => {
                write!(f, "salary must be a non-negative integer, got {value:?}")
            }
            Self::InvalidAge { value } => {
                write!(f, "age must be a non-negative integer, got {value:?}")
            }
        }
    }
}

impl std::error::Error for EmployeeValidationError {}

/// Externally assigned employee identifier.
///
/// # Examples
/// ```
/// use backend::domain::EmployeeId;
///
/// let id = EmployeeId::new("42").expect("valid id");
/// assert_eq!(id.as_ref(), "42");
/// assert!(EmployeeId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "1")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Validate and construct an [`EmployeeId`].
    pub fn new(id: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EmployeeValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(EmployeeValidationError::IdSurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = EmployeeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Immutable employee snapshot as reported by the upstream service.
///
/// ## Invariants
/// - `id` is non-empty.
/// - `profile_image` defaults to an empty string when the source omits it.
///
/// # Examples
/// ```
/// use backend::domain::{Employee, EmployeeId};
///
/// let alice = Employee::new(EmployeeId::new("1").expect("id"), "Alice", 5000, 30);
/// assert_eq!(alice.salary(), 5000);
/// assert_eq!(alice.profile_image(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    id: EmployeeId,
    #[serde(rename = "employee_name")]
    #[schema(example = "Alice")]
    name: String,
    #[serde(rename = "employee_salary")]
    #[schema(example = 5000)]
    salary: u64,
    #[serde(rename = "employee_age")]
    #[schema(example = 30)]
    age: u32,
    #[serde(default)]
    profile_image: String,
}

impl Employee {
    /// Build an employee with an empty profile image.
    pub fn new(id: EmployeeId, name: impl Into<String>, salary: u64, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            salary,
            age,
            profile_image: String::new(),
        }
    }

    /// Replace the profile image reference; `None` resets it to empty.
    #[must_use]
    pub fn with_profile_image(mut self, profile_image: Option<String>) -> Self {
        self.profile_image = profile_image.unwrap_or_default();
        self
    }

    /// Upstream identifier.
    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Salary in whole currency units.
    pub fn salary(&self) -> u64 {
        self.salary
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Profile image reference; empty when unknown.
    pub fn profile_image(&self) -> &str {
        self.profile_image.as_str()
    }
}

/// Validated employee draft sent to the upstream create endpoint.
///
/// `id` is optional; when absent the upstream service assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    id: Option<EmployeeId>,
    name: String,
    salary: u64,
    age: u32,
}

impl NewEmployee {
    /// Parse raw caller input into a draft.
    ///
    /// `salary` and `age` arrive as strings and must parse as non-negative
    /// integers without surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{EmployeeValidationError, NewEmployee};
    ///
    /// let draft = NewEmployee::try_from_parts(None, "Alice", "5000", "30").expect("valid");
    /// assert_eq!(draft.salary(), 5000);
    ///
    /// let err = NewEmployee::try_from_parts(None, "Alice", "lots", "30").unwrap_err();
    /// assert_eq!(err.field(), "salary");
    /// ```
    pub fn try_from_parts(
        id: Option<&str>,
        name: &str,
        salary: &str,
        age: &str,
    ) -> Result<Self, EmployeeValidationError> {
        let id = id.map(EmployeeId::new).transpose()?;
        if name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        let salary = salary
            .parse::<u64>()
            .map_err(|_| EmployeeValidationError::InvalidSalary {
                value: salary.to_owned(),
            })?;
        let age = age
            .parse::<u32>()
            .map_err(|_| EmployeeValidationError::InvalidAge {
                value: age.to_owned(),
            })?;
        Ok(Self {
            id,
            name: name.to_owned(),
            salary,
            age,
        })
    }

    /// Caller-supplied identifier, if any.
    pub fn id(&self) -> Option<&EmployeeId> {
        self.id.as_ref()
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Salary in whole currency units.
    pub fn salary(&self) -> u64 {
        self.salary
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }
}
