//! Shared helpers for the embedded PostgreSQL integration suites.

pub mod pg_embed;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

/// Render a `postgres` error with its SQLSTATE and server message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!("postgres error {:?}: {}", db_error.code(), db_error.message()),
        None => error.to_string(),
    }
}

/// Drop and recreate `name` on the cluster so each test starts empty.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<(), String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    // Database DDL cannot share an implicit transaction, so run each alone.
    for statement in [
        format!("DROP DATABASE IF EXISTS \"{name}\""),
        format!("CREATE DATABASE \"{name}\""),
    ] {
        client
            .batch_execute(&statement)
            .map_err(|err| format_postgres_error(&err))?;
    }
    Ok(())
}

/// Count rows in the mirror table, bypassing the repository under test.
pub fn employee_row_count(database_url: &str) -> Result<i64, String> {
    let mut client =
        Client::connect(database_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one("SELECT COUNT(*) FROM employees", &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Skip instead of failing when `SKIP_TEST_CLUSTER` is truthy.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if skip {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
