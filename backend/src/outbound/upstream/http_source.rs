//! Reqwest-backed upstream employee source.
//!
//! This adapter owns transport details only: URL construction, headers,
//! timeout and HTTP status mapping, and JSON decoding into domain employees.
//! Each port call issues exactly one request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{CreateEmployeeBodyDto, CreateResponseDto, EnvelopeDto};
use crate::domain::ports::{EmployeeSource, EmployeeSourceError};
use crate::domain::{Employee, EmployeeId, NewEmployee, TRACE_ID_HEADER, TraceId};

const DEFAULT_USER_AGENT: &str = concat!("employee-backend/", env!("CARGO_PKG_VERSION"));

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamHttpSourceBuildError {
    /// The base URL cannot carry path segments.
    #[error("upstream base URL cannot be a base: {url}")]
    InvalidBaseUrl { url: String },
    /// The authentication header name is not a valid HTTP header name.
    #[error("invalid upstream auth header name: {name}")]
    InvalidAuthHeader { name: String },
    /// The authentication value contains characters HTTP headers forbid.
    #[error("upstream auth value is not a valid header value")]
    InvalidAuthValue,
    /// The reqwest client could not be constructed.
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Header forwarded on every upstream call to satisfy the service's bot
/// protection. The value is wiped from memory on drop.
pub struct UpstreamAuth {
    header: HeaderName,
    value: Zeroizing<String>,
}

impl UpstreamAuth {
    /// Validate the header name and value.
    ///
    /// # Errors
    ///
    /// Returns an error when either part is not valid in an HTTP header.
    pub fn new(
        header: &str,
        value: Zeroizing<String>,
    ) -> Result<Self, UpstreamHttpSourceBuildError> {
        let header = HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            UpstreamHttpSourceBuildError::InvalidAuthHeader {
                name: header.to_owned(),
            }
        })?;
        HeaderValue::from_str(value.as_str())
            .map_err(|_| UpstreamHttpSourceBuildError::InvalidAuthValue)?;
        Ok(Self { header, value })
    }

    fn header_value(&self) -> Option<HeaderValue> {
        let mut value = HeaderValue::from_str(self.value.as_str()).ok()?;
        value.set_sensitive(true);
        Some(value)
    }
}

impl std::fmt::Debug for UpstreamAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamAuth")
            .field("header", &self.header)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Upstream employee source performing HTTP requests against one base URL.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use backend::outbound::upstream::UpstreamHttpSource;
/// use url::Url;
///
/// let base = Url::parse("https://dummy.restapiexample.com/api/v1").expect("url");
/// let source = UpstreamHttpSource::new(base, Duration::from_secs(10), None);
/// assert!(source.is_ok());
/// ```
pub struct UpstreamHttpSource {
    client: Client,
    base_url: Url,
    auth: Option<UpstreamAuth>,
}

impl UpstreamHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot carry path segments or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        auth: Option<UpstreamAuth>,
    ) -> Result<Self, UpstreamHttpSourceBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(UpstreamHttpSourceBuildError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, EmployeeSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| EmployeeSourceError::invalid_request("base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(auth) = &self.auth {
            if let Some(value) = auth.header_value() {
                builder = builder.header(auth.header.clone(), value);
            }
        }
        if let Some(trace_id) = TraceId::current() {
            builder = builder.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        builder
    }

    async fn send(
        &self,
        builder: RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), EmployeeSourceError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, Vec::from(body)))
    }
}

#[async_trait]
impl EmployeeSource for UpstreamHttpSource {
    async fn fetch_all(&self) -> Result<Vec<Employee>, EmployeeSourceError> {
        let url = self.endpoint(&["employees"])?;
        debug!(%url, "fetching employees from upstream");
        let (status, body) = self.send(self.request(Method::GET, url)).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        parse_employees(&body)
    }

    async fn fetch_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, EmployeeSourceError> {
        let url = self.endpoint(&["employee", id.as_ref()])?;
        debug!(%url, "fetching employee from upstream");
        let (status, body) = self.send(self.request(Method::GET, url)).await?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        Ok(parse_employees(&body)?
            .into_iter()
            .find(|employee| employee.id() == id))
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, EmployeeSourceError> {
        let url = self.endpoint(&["create"])?;
        debug!(%url, "creating employee upstream");
        let payload = CreateEmployeeBodyDto::from(employee);
        let (status, body) = self
            .send(self.request(Method::POST, url).json(&payload))
            .await?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, &body));
        }
        parse_created(&body)
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), EmployeeSourceError> {
        let url = self.endpoint(&["delete", id.as_ref()])?;
        debug!(%url, "deleting employee upstream");
        let (status, body) = self.send(self.request(Method::DELETE, url)).await?;
        if status != StatusCode::OK {
            return Err(map_status_error(status, &body));
        }
        Ok(())
    }
}

fn parse_employees(body: &[u8]) -> Result<Vec<Employee>, EmployeeSourceError> {
    let decoded: EnvelopeDto = serde_json::from_slice(body).map_err(|error| {
        EmployeeSourceError::decode(format!("invalid employee JSON payload: {error}"))
    })?;
    if let Some(summary) = decoded.failure_summary() {
        return Err(EmployeeSourceError::decode(format!(
            "upstream reported failure: {summary}"
        )));
    }
    decoded
        .into_domain_employees()
        .map_err(EmployeeSourceError::decode)
}

fn parse_created(body: &[u8]) -> Result<Employee, EmployeeSourceError> {
    let decoded: CreateResponseDto = serde_json::from_slice(body).map_err(|error| {
        EmployeeSourceError::decode(format!("invalid create response payload: {error}"))
    })?;
    decoded
        .into_domain_employee()
        .map_err(EmployeeSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> EmployeeSourceError {
    if error.is_timeout() {
        EmployeeSourceError::timeout(error.to_string())
    } else {
        EmployeeSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EmployeeSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => EmployeeSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            EmployeeSourceError::timeout(message)
        }
        _ => EmployeeSourceError::status(status.as_u16(), message),
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
