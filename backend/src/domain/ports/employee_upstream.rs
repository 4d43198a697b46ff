//! Driven port for the upstream employee directory.
//!
//! The port works at transport level: adapters report the HTTP status they
//! observed together with the decoded envelope, and the facade decides what
//! each status means. Adapters only fail with [`EmployeeUpstreamError`] when
//! no usable response was obtained at all.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Employee, NewEmployee};

/// Transport status reported by the upstream directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpstreamStatus(u16);

impl UpstreamStatus {
    /// `200 OK`.
    pub const OK: Self = Self(200);
    /// `404 Not Found`.
    pub const NOT_FOUND: Self = Self(404);
    /// `429 Too Many Requests`, sent when upstream rate-limits.
    pub const TOO_MANY_REQUESTS: Self = Self(429);
    /// `500 Internal Server Error`.
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// Wrap a numeric HTTP status code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Numeric HTTP status code.
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Whether the status is in the 2xx range.
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Whether upstream reported the entity as missing.
    pub const fn is_not_found(self) -> bool {
        self.0 == Self::NOT_FOUND.0
    }
}

impl fmt::Display for UpstreamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream response wrapper: a payload plus an informational status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    /// Payload; absent when upstream sent `null` or omitted it.
    pub data: Option<T>,
    /// Informational status text, e.g. `"Successfully processed request."`.
    pub status: Option<String>,
}

impl<T> Envelope<T> {
    /// Envelope carrying a payload and no status text.
    pub fn with_data(data: T) -> Self {
        Self {
            data: Some(data),
            status: None,
        }
    }

    /// Attach status text.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// One upstream exchange: the observed status and the envelope, if the body
/// decoded into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply<T> {
    /// Transport status observed by the adapter.
    pub status: UpstreamStatus,
    /// Decoded envelope; absent when the body was empty or undecodable.
    pub envelope: Option<Envelope<T>>,
}

impl<T> UpstreamReply<T> {
    /// Pair a status with an optional envelope.
    pub fn new(status: UpstreamStatus, envelope: Option<Envelope<T>>) -> Self {
        Self { status, envelope }
    }

    /// `200 OK` carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::new(UpstreamStatus::OK, Some(Envelope::with_data(data)))
    }

    /// A reply with no decodable body.
    pub fn bare(status: UpstreamStatus) -> Self {
        Self::new(status, None)
    }

    /// Borrow the payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.envelope.as_ref().and_then(|envelope| envelope.data.as_ref())
    }

    /// Take the payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.envelope.and_then(|envelope| envelope.data)
    }

    /// Envelope status text, if upstream sent one.
    pub fn status_text(&self) -> Option<&str> {
        self.envelope
            .as_ref()
            .and_then(|envelope| envelope.status.as_deref())
    }
}

define_port_error! {
    /// Errors raised when the upstream directory produced no usable response.
    pub enum EmployeeUpstreamError {
        /// Connection failed or the request could not be built.
        Transport => "employee directory transport failed",
        /// The configured client timeout elapsed.
        Timeout => "employee directory timed out",
        /// A success response carried a body that is not a valid envelope.
        Decode => "employee directory response decode failed",
    }
}

/// Port for the upstream employee directory API.
///
/// Every method issues exactly one upstream request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeUpstream: Send + Sync {
    /// `GET <base>`: every employee, in upstream order.
    async fn list_employees(&self) -> Result<UpstreamReply<Vec<Employee>>, EmployeeUpstreamError>;

    /// `GET <base>/{id}`: one employee.
    async fn fetch_employee(&self, id: &str) -> Result<UpstreamReply<Employee>, EmployeeUpstreamError>;

    /// `POST <base>`: create an employee from validated input.
    async fn create_employee(
        &self,
        employee: &NewEmployee,
    ) -> Result<UpstreamReply<Employee>, EmployeeUpstreamError>;

    /// `DELETE <base>` with body `{"name": ...}`. Upstream deletes by name.
    async fn delete_employee_by_name(
        &self,
        name: &str,
    ) -> Result<UpstreamReply<bool>, EmployeeUpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(200, true, false)]
    #[case(201, true, false)]
    #[case(299, true, false)]
    #[case(404, false, true)]
    #[case(429, false, false)]
    #[case(500, false, false)]
    fn classifies_statuses(#[case] code: u16, #[case] success: bool, #[case] not_found: bool) {
        let status = UpstreamStatus::new(code);
        assert_eq!(status.is_success(), success);
        assert_eq!(status.is_not_found(), not_found);
        assert_eq!(status.to_string(), code.to_string());
    }

    #[test]
    fn reply_exposes_payload_and_status_text() {
        let reply = UpstreamReply::new(
            UpstreamStatus::OK,
            Some(Envelope::with_data(false).with_status("Deletion failed")),
        );
        assert_eq!(reply.data(), Some(&false));
        assert_eq!(reply.status_text(), Some("Deletion failed"));
        assert_eq!(reply.into_data(), Some(false));
    }

    #[test]
    fn bare_reply_has_no_payload() {
        let reply = UpstreamReply::<bool>::bare(UpstreamStatus::INTERNAL_SERVER_ERROR);
        assert!(reply.data().is_none());
        assert!(reply.status_text().is_none());
    }

    #[test]
    fn errors_render_with_prefix() {
        let err = EmployeeUpstreamError::timeout("after 10s");
        assert_eq!(err.to_string(), "employee directory timed out: after 10s");
    }
}
