//! Reqwest-backed upstream employee directory adapter.
//!
//! This adapter owns transport details only: URL building, request
//! serialisation, timeout and transport error mapping, and JSON decoding of
//! the upstream envelope. Interpreting statuses is left to the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{CreateEmployeeDto, DeleteEmployeeDto, EmployeeDto, EnvelopeDto};
use crate::domain::ports::{EmployeeUpstream, EmployeeUpstreamError, UpstreamReply, UpstreamStatus};
use crate::domain::{Employee, NewEmployee, TRACE_ID_HEADER, TraceId};

const DEFAULT_USER_AGENT: &str = "employee-directory/0.1";

/// Upstream adapter issuing one HTTP request per port call against a base
/// collection URL such as `http://localhost:8112/api/v1/employee`.
pub struct ReqwestEmployeeUpstream {
    client: Client,
    base_url: Url,
}

impl ReqwestEmployeeUpstream {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use employee_directory::outbound::employee_api::ReqwestEmployeeUpstream;
    /// use url::Url;
    ///
    /// let base_url = Url::parse("http://localhost:8112/api/v1/employee").expect("valid url");
    /// let upstream = ReqwestEmployeeUpstream::new(base_url, Duration::from_secs(10))
    ///     .expect("client builds");
    /// assert_eq!(upstream.base_url().path(), "/api/v1/employee");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base collection URL this adapter targets.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn employee_url(&self, id: &str) -> Result<Url, EmployeeUpstreamError> {
        employee_url(&self.base_url, id)
    }

    async fn exchange<P>(
        &self,
        request: RequestBuilder,
    ) -> Result<(UpstreamStatus, Option<EnvelopeDto<P>>), EmployeeUpstreamError>
    where
        P: DeserializeOwned,
    {
        let mut request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(trace_id) = TraceId::current() {
            request = request.header(TRACE_ID_HEADER, trace_id.to_string());
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = UpstreamStatus::new(response.status().as_u16());
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = %status, bytes = body.len(), "upstream responded");

        let envelope = decode_envelope(status, body.as_ref())?;
        Ok((status, envelope))
    }
}

#[async_trait]
impl EmployeeUpstream for ReqwestEmployeeUpstream {
    async fn list_employees(&self) -> Result<UpstreamReply<Vec<Employee>>, EmployeeUpstreamError> {
        let (status, envelope) = self
            .exchange::<Vec<EmployeeDto>>(self.client.get(self.base_url.clone()))
            .await?;
        Ok(UpstreamReply::new(
            status,
            envelope.map(|dto| dto.into_envelope(EmployeeDto::into_domain_list)),
        ))
    }

    async fn fetch_employee(&self, id: &str) -> Result<UpstreamReply<Employee>, EmployeeUpstreamError> {
        let url = self.employee_url(id)?;
        let (status, envelope) = self.exchange::<EmployeeDto>(self.client.get(url)).await?;
        Ok(UpstreamReply::new(
            status,
            envelope.map(|dto| dto.into_envelope(EmployeeDto::into_domain)),
        ))
    }

    async fn create_employee(
        &self,
        employee: &NewEmployee,
    ) -> Result<UpstreamReply<Employee>, EmployeeUpstreamError> {
        let request = self
            .client
            .post(self.base_url.clone())
            .json(&CreateEmployeeDto::from(employee));
        let (status, envelope) = self.exchange::<EmployeeDto>(request).await?;
        Ok(UpstreamReply::new(
            status,
            envelope.map(|dto| dto.into_envelope(EmployeeDto::into_domain)),
        ))
    }

    async fn delete_employee_by_name(
        &self,
        name: &str,
    ) -> Result<UpstreamReply<bool>, EmployeeUpstreamError> {
        let request = self
            .client
            .delete(self.base_url.clone())
            .json(&DeleteEmployeeDto { name });
        let (status, envelope) = self.exchange::<bool>(request).await?;
        Ok(UpstreamReply::new(
            status,
            envelope.map(|dto| dto.into_envelope(|deleted| deleted)),
        ))
    }
}

fn employee_url(base_url: &Url, id: &str) -> Result<Url, EmployeeUpstreamError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            EmployeeUpstreamError::transport(format!("base url {base_url} cannot carry an id"))
        })?
        .pop_if_empty()
        .push(id);
    Ok(url)
}

/// Decode the envelope of one response.
///
/// An empty body yields no envelope. An undecodable body is a `Decode` error
/// on success statuses only; error statuses keep whatever status they carry
/// so the domain can still classify them.
fn decode_envelope<P>(
    status: UpstreamStatus,
    body: &[u8],
) -> Result<Option<EnvelopeDto<P>>, EmployeeUpstreamError>
where
    P: DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice(body) {
        Ok(envelope) => Ok(Some(envelope)),
        Err(error) if status.is_success() => Err(EmployeeUpstreamError::decode(format!(
            "status {status}: invalid envelope: {error}; body: {}",
            body_preview(body)
        ))),
        Err(error) => {
            debug!(status = %status, %error, "ignoring undecodable error body");
            Ok(None)
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> EmployeeUpstreamError {
    if error.is_timeout() {
        EmployeeUpstreamError::timeout(error.to_string())
    } else {
        EmployeeUpstreamError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn base() -> Url {
        Url::parse("http://localhost:8112/api/v1/employee").expect("valid url")
    }

    #[rstest]
    #[case::plain("http://localhost:8112/api/v1/employee", "5", "http://localhost:8112/api/v1/employee/5")]
    #[case::trailing_slash("http://localhost:8112/api/v1/employee/", "5", "http://localhost:8112/api/v1/employee/5")]
    #[case::escaped("http://localhost:8112/api/v1/employee", "a b/c", "http://localhost:8112/api/v1/employee/a%20b%2Fc")]
    fn appends_id_as_a_single_path_segment(
        #[case] base_url: &str,
        #[case] id: &str,
        #[case] expected: &str,
    ) {
        let base_url = Url::parse(base_url).expect("valid url");
        let url = employee_url(&base_url, id).expect("url builds");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn new_keeps_the_configured_base_url() {
        let upstream =
            ReqwestEmployeeUpstream::new(base(), Duration::from_secs(3)).expect("client builds");
        assert_eq!(upstream.base_url(), &base());
    }

    #[test]
    fn rejects_base_urls_without_a_path() {
        let base_url = Url::parse("mailto:directory@example.com").expect("valid url");
        let error = employee_url(&base_url, "5").expect_err("cannot-be-a-base url");
        assert!(matches!(error, EmployeeUpstreamError::Transport { .. }));
    }

    #[test]
    fn empty_bodies_carry_no_envelope() {
        let envelope =
            decode_envelope::<bool>(UpstreamStatus::OK, b"  \n").expect("empty body is fine");
        assert!(envelope.is_none());
    }

    #[test]
    fn undecodable_success_bodies_are_decode_errors() {
        let error = decode_envelope::<EmployeeDto>(UpstreamStatus::OK, b"<html>oops</html>")
            .expect_err("success body must decode");
        assert!(matches!(error, EmployeeUpstreamError::Decode { .. }));
        assert!(error.message().contains("<html>oops</html>"));
    }

    #[rstest]
    #[case::not_found(UpstreamStatus::NOT_FOUND)]
    #[case::rate_limited(UpstreamStatus::TOO_MANY_REQUESTS)]
    #[case::server_error(UpstreamStatus::INTERNAL_SERVER_ERROR)]
    fn undecodable_error_bodies_are_dropped(#[case] status: UpstreamStatus) {
        let envelope = decode_envelope::<EmployeeDto>(status, b"Too Many Requests")
            .expect("error bodies never fail decoding");
        assert!(envelope.is_none());
    }

    #[test]
    fn error_envelopes_keep_their_status_text() {
        let envelope = decode_envelope::<bool>(
            UpstreamStatus::INTERNAL_SERVER_ERROR,
            br#"{"data":false,"status":"Deletion failed"}"#,
        )
        .expect("decodes")
        .expect("envelope present");
        assert_eq!(envelope.data, Some(false));
        assert_eq!(envelope.status.as_deref(), Some("Deletion failed"));
    }

    #[test]
    fn previews_are_compacted_and_truncated() {
        let long = format!("a  b\n{}", "x".repeat(400));
        let preview = body_preview(long.as_bytes());
        assert!(preview.starts_with("a b x"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[test]
    fn exposes_configured_base_url() {
        let upstream =
            ReqwestEmployeeUpstream::new(base(), Duration::from_secs(1)).expect("client builds");
        assert_eq!(upstream.base_url(), &base());
    }
}
