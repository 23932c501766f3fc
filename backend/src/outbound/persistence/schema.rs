//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Mirror of employees fetched from the upstream service.
    employees (id) {
        /// Upstream identifier.
        id -> Varchar,
        employee_name -> Varchar,
        employee_salary -> Int8,
        employee_age -> Int4,
        profile_image -> Varchar,
        /// Last time the row was written by a listing.
        mirrored_at -> Timestamptz,
    }
}
