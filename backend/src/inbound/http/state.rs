//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeeDirectoryCommand, EmployeeDirectoryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side directory operations.
    pub employees: Arc<dyn EmployeeDirectoryQuery>,
    /// Create and delete operations.
    pub employee_commands: Arc<dyn EmployeeDirectoryCommand>,
}

impl HttpState {
    /// Construct state from explicit query and command ports.
    pub fn new(
        employees: Arc<dyn EmployeeDirectoryQuery>,
        employee_commands: Arc<dyn EmployeeDirectoryCommand>,
    ) -> Self {
        Self {
            employees,
            employee_commands,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// use employee_directory::domain::EmployeeDirectoryService;
    /// use employee_directory::inbound::http::state::HttpState;
    /// use employee_directory::outbound::employee_api::ReqwestEmployeeUpstream;
    ///
    /// let base = "http://localhost:8112/api/v1/employee".parse().expect("valid url");
    /// let upstream = ReqwestEmployeeUpstream::new(base, Duration::from_secs(10))
    ///     .expect("client builds");
    /// let service = Arc::new(EmployeeDirectoryService::new(Arc::new(upstream)));
    /// let state = HttpState::from_service(service);
    /// let _employees = state.employees.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: EmployeeDirectoryQuery + EmployeeDirectoryCommand + 'static,
    {
        Self {
            employees: service.clone(),
            employee_commands: service,
        }
    }
}
