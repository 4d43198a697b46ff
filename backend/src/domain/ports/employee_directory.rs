//! Driving ports exposed by the employee directory facade.
//!
//! Inbound adapters depend on these traits only, so handlers stay testable
//! without a live upstream.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeCreateRequest, Error};

/// Read-side operations of the facade.
#[async_trait]
pub trait EmployeeDirectoryQuery: Send + Sync {
    /// Every employee, in upstream order.
    async fn list_employees(&self) -> Result<Vec<Employee>, Error>;

    /// Employees whose name contains `fragment`, ignoring case. An empty
    /// fragment matches everyone.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>, Error>;

    /// One employee, or `None` when upstream succeeded without a payload.
    async fn get_employee(&self, id: &str) -> Result<Option<Employee>, Error>;

    /// Highest salary in the directory; `0` when it is empty.
    async fn highest_salary(&self) -> Result<i64, Error>;

    /// Names of the ten best-paid employees, highest salary first.
    async fn top_earner_names(&self) -> Result<Vec<String>, Error>;
}

/// Write-side operations of the facade.
#[async_trait]
pub trait EmployeeDirectoryCommand: Send + Sync {
    /// Validate and create an employee. `None` means the caller sent no
    /// request at all.
    async fn create_employee(
        &self,
        request: Option<EmployeeCreateRequest>,
    ) -> Result<Option<Employee>, Error>;

    /// Delete the employee with `id` and return its name. `None` means the
    /// caller supplied no identifier.
    async fn delete_employee(&self, id: Option<&str>) -> Result<String, Error>;
}
