//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_directory;
mod employee_mirror_repository;
mod employee_source;

#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use employee_directory::{EmployeeDirectory, FixtureEmployeeDirectory};
#[cfg(test)]
pub use employee_mirror_repository::MockEmployeeMirrorRepository;
pub use employee_mirror_repository::{
    EmployeeMirrorRepository, EmployeeMirrorRepositoryError, InMemoryEmployeeMirror,
};
#[cfg(test)]
pub use employee_source::MockEmployeeSource;
pub use employee_source::{EmployeeSource, EmployeeSourceError, FixtureEmployeeSource};
