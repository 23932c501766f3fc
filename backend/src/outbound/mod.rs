//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **upstream**: `reqwest` client for the upstream employee service
//! - **persistence**: PostgreSQL employee mirror using Diesel ORM
//!
//! Adapters are thin translators between domain types and wire or row
//! representations. They contain no business logic.

pub mod persistence;
pub mod upstream;
