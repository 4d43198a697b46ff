//! DTOs for the upstream employee directory wire format.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records (`Employee`, `Envelope`) in one pass. Upstream prefixes employee
//! fields with `employee_`; request bodies use plain names.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::Envelope;
use crate::domain::{Employee, NewEmployee};

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub(super) struct EnvelopeDto<P> {
    #[serde(default)]
    pub(super) data: Option<P>,
    #[serde(default)]
    pub(super) status: Option<String>,
}

impl<P> EnvelopeDto<P> {
    pub(super) fn into_envelope<T>(self, map: impl FnOnce(P) -> T) -> Envelope<T> {
        Envelope {
            data: self.data.map(map),
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EmployeeDto {
    pub(super) id: String,
    pub(super) employee_name: String,
    pub(super) employee_salary: i64,
    pub(super) employee_age: i32,
    #[serde(default)]
    pub(super) employee_title: Option<String>,
    #[serde(default)]
    pub(super) employee_email: Option<String>,
}

impl EmployeeDto {
    pub(super) fn into_domain(self) -> Employee {
        Employee {
            id: self.id,
            name: self.employee_name,
            salary: self.employee_salary,
            age: self.employee_age,
            title: self.employee_title.unwrap_or_default(),
            email: self.employee_email.unwrap_or_default(),
        }
    }

    pub(super) fn into_domain_list(employees: Vec<Self>) -> Vec<Employee> {
        employees.into_iter().map(Self::into_domain).collect()
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreateEmployeeDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) id: Option<Uuid>,
    pub(super) name: &'a str,
    pub(super) salary: i64,
    pub(super) age: i32,
    pub(super) title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) email: Option<&'a str>,
}

impl<'a> From<&'a NewEmployee> for CreateEmployeeDto<'a> {
    fn from(employee: &'a NewEmployee) -> Self {
        Self {
            id: employee.id(),
            name: employee.name(),
            salary: employee.salary(),
            age: employee.age(),
            title: employee.title(),
            email: employee.email(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteEmployeeDto<'a> {
    pub(super) name: &'a str,
}
