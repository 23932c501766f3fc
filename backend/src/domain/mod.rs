//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed employee entities and the use-case service
//! the inbound adapters call. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Employee, EmployeeId, NewEmployee — employee snapshot and create draft.
//! - EmployeeDirectoryService — driving port implementation.
//! - TraceId — request-scoped correlation identifier.

pub mod employee;
pub mod employee_directory_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
pub use self::employee_directory_service::EmployeeDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
