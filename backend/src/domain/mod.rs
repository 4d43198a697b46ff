//! Domain primitives, ports, and the employee directory facade.
//!
//! Purpose: Define the strongly typed employee model, the error payload the
//! API reports, and the ports separating HTTP adapters from the upstream
//! directory. Keep types immutable and document serialisation contracts in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Employee (alias to `employee::Employee`): employee record as reported upstream.
//! - EmployeeCreateRequest / NewEmployee: raw and validated create input.
//! - EmployeeDirectoryService: facade implementing the driving ports.
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId: per-request correlation identifier.

pub mod employee;
pub mod employee_directory_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::employee::{
    Employee, EmployeeCreateRequest, EmployeeValidationError, MAX_AGE, MIN_AGE, NewEmployee,
};
pub use self::employee_directory_service::{EmployeeDirectoryService, TOP_EARNERS_LIMIT};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use employee_directory::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("employee not found with id: 7"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
