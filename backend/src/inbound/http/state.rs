//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only on
//! the [`EmployeeDirectory`] driving port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::EmployeeDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeeDirectory>,
}

impl HttpState {
    /// Construct state from the employee directory port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::FixtureEmployeeDirectory;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureEmployeeDirectory));
    /// let _employees = state.employees.clone();
    /// ```
    pub fn new(employees: Arc<dyn EmployeeDirectory>) -> Self {
        Self { employees }
    }
}
