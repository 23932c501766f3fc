//! PostgreSQL persistence for the employee mirror.
//!
//! Backed by Diesel with async support through `diesel-async` and `bb8`
//! connection pooling. Row structs (`models.rs`) and the table definition
//! (`schema.rs`) stay private to this module; the repository only translates
//! between rows and domain employees.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselEmployeeMirrorRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/employees")).await?;
//! let mirror = DieselEmployeeMirrorRepository::new(pool);
//! ```

mod diesel_employee_mirror_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_employee_mirror_repository::DieselEmployeeMirrorRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
