//! Employee directory facade.
//!
//! Implements the driving ports on top of the [`EmployeeUpstream`] port:
//! interprets upstream statuses and envelopes, validates create input before
//! any network call, derives the aggregate views from the full collection,
//! and resolves names for the name-keyed upstream delete. Nothing is cached;
//! every operation re-fetches and no call is retried.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{
    EmployeeDirectoryCommand, EmployeeDirectoryQuery, EmployeeUpstream, EmployeeUpstreamError,
    UpstreamReply,
};
use crate::domain::{Employee, EmployeeCreateRequest, EmployeeValidationError, Error, NewEmployee};

/// Number of names returned by [`EmployeeDirectoryQuery::top_earner_names`].
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Stateless facade over one upstream directory.
pub struct EmployeeDirectoryService<U> {
    upstream: Arc<U>,
}

impl<U> EmployeeDirectoryService<U> {
    /// Create a facade over the given upstream adapter.
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream }
    }
}

impl<U> EmployeeDirectoryService<U>
where
    U: EmployeeUpstream,
{
    async fn fetch_all(&self) -> Result<Vec<Employee>, Error> {
        let reply = self
            .upstream
            .list_employees()
            .await
            .map_err(|err| transport_failure("failed to fetch employees", &err))?;
        if !reply.status.is_success() {
            error!(status = %reply.status, "failed to fetch employees");
            return Err(status_failure("failed to fetch employees", &reply));
        }
        Ok(reply.into_data().unwrap_or_default())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, Error> {
        let reply = self
            .upstream
            .fetch_employee(id)
            .await
            .map_err(|err| transport_failure("failed to fetch employee", &err))?;
        if reply.status.is_success() {
            return Ok(reply.into_data());
        }
        if reply.status.is_not_found() {
            warn!(employee_id = id, "employee not found upstream");
            return Err(not_found(id));
        }
        error!(employee_id = id, status = %reply.status, "failed to fetch employee");
        Err(status_failure("failed to fetch employee", &reply))
    }
}

#[async_trait]
impl<U> EmployeeDirectoryQuery for EmployeeDirectoryService<U>
where
    U: EmployeeUpstream,
{
    async fn list_employees(&self) -> Result<Vec<Employee>, Error> {
        info!("fetching all employees");
        self.fetch_all().await
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>, Error> {
        info!(search = fragment, "searching employees by name");
        let needle = fragment.to_lowercase();
        let employees = self.fetch_all().await?;
        Ok(employees
            .into_iter()
            .filter(|employee| employee.name.to_lowercase().contains(&needle))
            .collect())
    }

    async fn get_employee(&self, id: &str) -> Result<Option<Employee>, Error> {
        info!(employee_id = id, "fetching employee");
        self.find_by_id(id).await
    }

    async fn highest_salary(&self) -> Result<i64, Error> {
        info!("computing highest salary");
        let employees = self.fetch_all().await?;
        Ok(employees
            .iter()
            .map(|employee| employee.salary)
            .max()
            .unwrap_or(0))
    }

    async fn top_earner_names(&self) -> Result<Vec<String>, Error> {
        info!("computing top earners");
        let mut employees = self.fetch_all().await?;
        employees.sort_by_key(|employee| Reverse(employee.salary));
        Ok(employees
            .into_iter()
            .take(TOP_EARNERS_LIMIT)
            .map(|employee| employee.name)
            .collect())
    }
}

#[async_trait]
impl<U> EmployeeDirectoryCommand for EmployeeDirectoryService<U>
where
    U: EmployeeUpstream,
{
    async fn create_employee(
        &self,
        request: Option<EmployeeCreateRequest>,
    ) -> Result<Option<Employee>, Error> {
        let request =
            request.ok_or_else(|| Error::missing_argument("employee input must be provided"))?;
        let employee = NewEmployee::try_from(request).map_err(map_validation_error)?;

        info!(name = employee.name(), "creating employee");
        let reply = self
            .upstream
            .create_employee(&employee)
            .await
            .map_err(|err| transport_failure("failed to create employee", &err))?;
        if reply.status.is_success() {
            return Ok(reply.into_data());
        }
        error!(status = %reply.status, "failed to create employee");
        Err(status_failure("failed to create employee", &reply))
    }

    async fn delete_employee(&self, id: Option<&str>) -> Result<String, Error> {
        let id = id.ok_or_else(|| Error::missing_argument("employee id must be provided"))?;
        if id.trim().is_empty() {
            return Err(Error::invalid_request("employee id must not be blank")
                .with_details(json!({ "field": "id", "code": "blank_id" })));
        }

        info!(employee_id = id, "deleting employee");
        let employee = self.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

        let reply = self
            .upstream
            .delete_employee_by_name(&employee.name)
            .await
            .map_err(|err| transport_failure("failed to delete employee", &err))?;
        if reply.status.is_success() && reply.data() == Some(&true) {
            return Ok(employee.name);
        }
        error!(
            employee_id = id,
            status = %reply.status,
            upstream_status = reply.status_text().unwrap_or_default(),
            "failed to delete employee"
        );
        Err(delete_failure(&reply))
    }
}

fn not_found(id: &str) -> Error {
    Error::not_found(format!("employee not found with id: {id}"))
        .with_details(json!({ "id": id }))
}

fn map_validation_error(err: EmployeeValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

fn transport_failure(action: &str, err: &EmployeeUpstreamError) -> Error {
    error!(error = %err, action, "upstream call failed");
    Error::upstream_failure(format!("{action}: {err}"))
}

fn status_failure<T>(action: &str, reply: &UpstreamReply<T>) -> Error {
    let message = match reply.status_text() {
        Some(text) => format!("{action}: upstream returned {} ({text})", reply.status),
        None => format!("{action}: upstream returned {}", reply.status),
    };
    Error::upstream_failure(message).with_details(json!({
        "upstreamStatus": reply.status.as_u16(),
    }))
}

fn delete_failure(reply: &UpstreamReply<bool>) -> Error {
    if !reply.status.is_success() {
        return status_failure("failed to delete employee", reply);
    }
    let reason = reply
        .status_text()
        .unwrap_or("upstream did not confirm the deletion");
    Error::upstream_failure(format!("failed to delete employee: {reason}")).with_details(json!({
        "upstreamStatus": reply.status.as_u16(),
    }))
}

#[cfg(test)]
#[path = "employee_directory_service_tests.rs"]
mod tests;
