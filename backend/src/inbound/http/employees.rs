//! Employee directory API handlers.
//!
//! ```text
//! GET    /api/v1/employee
//! GET    /api/v1/employee/search/{searchString}
//! GET    /api/v1/employee/highestSalary
//! GET    /api/v1/employee/topTenHighestEarningEmployeeNames
//! GET    /api/v1/employee/{id}
//! POST   /api/v1/employee {"name":"Ada","salary":90000,"age":36,"title":"Engineer"}
//! DELETE /api/v1/employee/{id}
//! ```
//!
//! Handlers are registered in the order above: literal segments must be
//! matched before the `{id}` catch-all.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Employee, EmployeeCreateRequest, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Employee record returned by the API, using the upstream field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeBody {
    /// Upstream-assigned identifier.
    #[schema(example = "4a3a170b-22cd-4ac2-aad1-9bb5b34a1507")]
    pub id: String,
    /// Display name.
    #[schema(example = "Tiger Nixon")]
    pub employee_name: String,
    /// Salary.
    #[schema(example = 320_800)]
    pub employee_salary: i64,
    /// Age in years.
    #[schema(example = 61)]
    pub employee_age: i32,
    /// Job title.
    #[schema(example = "Vice Chair Executive Principal")]
    pub employee_title: String,
    /// Contact email.
    #[schema(example = "tnixon@company.com")]
    pub employee_email: String,
}

impl From<Employee> for EmployeeBody {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            employee_name: employee.name,
            employee_salary: employee.salary,
            employee_age: employee.age,
            employee_title: employee.title,
            employee_email: employee.email,
        }
    }
}

/// Create request body for `POST /api/v1/employee`.
///
/// Every field is optional on the wire; missing values are reported by the
/// create validation rules rather than by JSON decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployeeBody {
    /// Optional candidate identifier.
    pub id: Option<Uuid>,
    /// Required, non-blank.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// Required, greater than zero.
    #[schema(example = 90_000)]
    pub salary: Option<i64>,
    /// Required, between 16 and 75 inclusive.
    #[schema(example = 36)]
    pub age: Option<i32>,
    /// Required, non-blank.
    #[schema(example = "Engineer")]
    pub title: Option<String>,
    /// Optional contact email.
    #[schema(example = "ada@company.com")]
    pub email: Option<String>,
}

impl From<CreateEmployeeBody> for EmployeeCreateRequest {
    fn from(body: CreateEmployeeBody) -> Self {
        Self {
            id: body.id,
            name: body.name,
            salary: body.salary,
            age: body.age,
            title: body.title,
            email: body.email,
        }
    }
}

fn decode_create_body(payload: &[u8]) -> Result<Option<EmployeeCreateRequest>, Error> {
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<CreateEmployeeBody>>(payload)
        .map(|body| body.map(EmployeeCreateRequest::from))
        .map_err(|err| Error::invalid_request(format!("employee input is not valid JSON: {err}")))
}

fn to_bodies(employees: Vec<Employee>) -> Vec<EmployeeBody> {
    employees.into_iter().map(EmployeeBody::from).collect()
}

/// Register every employee route on `cfg` in matching order.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use employee_directory::inbound::http::employees;
///
/// let app = App::new().service(web::scope("/api/v1").configure(employees::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_employees)
        .service(search_employees)
        .service(highest_salary)
        .service(top_earner_names)
        .service(get_employee)
        .service(create_employee)
        .service(delete_employee);
}

/// List every employee in upstream order.
#[utoipa::path(
    get,
    path = "/api/v1/employee",
    responses(
        (status = 200, description = "Employees", body = [EmployeeBody]),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getAllEmployees"
)]
#[get("/employee")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<EmployeeBody>>> {
    let employees = state.employees.list_employees().await?;
    Ok(web::Json(to_bodies(employees)))
}

/// Employees whose name contains the search string, ignoring case.
#[utoipa::path(
    get,
    path = "/api/v1/employee/search/{searchString}",
    params(("searchString" = String, Path, description = "Name fragment to match")),
    responses(
        (status = 200, description = "Matching employees", body = [EmployeeBody]),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployeesByNameSearch"
)]
#[get("/employee/search/{searchString}")]
pub async fn search_employees(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<EmployeeBody>>> {
    let fragment = path.into_inner();
    let employees = state.employees.search_by_name(&fragment).await?;
    Ok(web::Json(to_bodies(employees)))
}

/// Highest salary in the directory; `0` when it is empty.
#[utoipa::path(
    get,
    path = "/api/v1/employee/highestSalary",
    responses(
        (status = 200, description = "Highest salary", body = i64),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getHighestSalaryOfEmployees"
)]
#[get("/employee/highestSalary")]
pub async fn highest_salary(state: web::Data<HttpState>) -> ApiResult<web::Json<i64>> {
    let salary = state.employees.highest_salary().await?;
    Ok(web::Json(salary))
}

/// Names of the ten best-paid employees, highest salary first.
#[utoipa::path(
    get,
    path = "/api/v1/employee/topTenHighestEarningEmployeeNames",
    responses(
        (status = 200, description = "Employee names", body = [String]),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getTopTenHighestEarningEmployeeNames"
)]
#[get("/employee/topTenHighestEarningEmployeeNames")]
pub async fn top_earner_names(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<String>>> {
    let names = state.employees.top_earner_names().await?;
    Ok(web::Json(names))
}

/// One employee by id; `null` when upstream succeeded without a payload.
#[utoipa::path(
    get,
    path = "/api/v1/employee/{id}",
    params(("id" = String, Path, description = "Upstream employee identifier")),
    responses(
        (status = 200, description = "Employee, or null when upstream sent no payload", body = EmployeeBody),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployeeById"
)]
#[get("/employee/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<EmployeeBody>>> {
    let id = path.into_inner();
    let employee = state.employees.get_employee(&id).await?;
    Ok(web::Json(employee.map(EmployeeBody::from)))
}

/// Validate and create an employee.
///
/// An empty body or a JSON `null` is reported as a missing argument; a body
/// that does not decode as [`CreateEmployeeBody`] is an invalid request.
#[utoipa::path(
    post,
    path = "/api/v1/employee",
    request_body = CreateEmployeeBody,
    responses(
        (status = 201, description = "Created employee, or null when upstream sent no payload", body = EmployeeBody),
        (status = 400, description = "Invalid or missing input", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employee")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = decode_create_body(&payload)?;
    let created = state.employee_commands.create_employee(request).await?;
    Ok(HttpResponse::Created().json(created.map(EmployeeBody::from)))
}

/// Delete an employee by id and return the deleted employee's name.
#[utoipa::path(
    delete,
    path = "/api/v1/employee/{id}",
    params(("id" = String, Path, description = "Upstream employee identifier")),
    responses(
        (status = 200, description = "Name of the deleted employee", body = String),
        (status = 400, description = "Blank identifier", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Upstream failure", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployeeById"
)]
#[delete("/employee/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<String>> {
    let id = path.into_inner();
    let name = state.employee_commands.delete_employee(Some(&id)).await?;
    Ok(web::Json(name))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
