//! # HTTP Request Contract
//!
//! One JSON request against the order API.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        send_http_request                                │
//! │                                                                         │
//! │  { url, method?, headers?, body? } ──► reqwest ──► status + JSON body   │
//! │                                                                         │
//! │  2xx ────────────────► parse body as T ──────────► Ok(T)               │
//! │  non-2xx ────────────► body.message or fallback ─► Err(Status)         │
//! │  no response ────────────────────────────────────► Err(Transport)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, ClientResult, FALLBACK_REQUEST_MESSAGE};

// =============================================================================
// Request Configuration
// =============================================================================

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Returns true for methods that only read.
    pub fn is_read(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method: reqwest::Method = (*self).into();
        write!(f, "{}", method)
    }
}

/// Static part of a request: method and headers.
///
/// Compared structurally: two configs with the same method and headers are
/// the same request, whichever allocation they live in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestConfig {
    /// `None` means GET.
    #[serde(default)]
    pub method: Option<HttpMethod>,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RequestConfig {
    /// A GET request with no extra headers.
    pub fn get() -> Self {
        RequestConfig::default()
    }

    /// A POST request sending JSON.
    pub fn post_json() -> Self {
        RequestConfig::default()
            .with_method(HttpMethod::Post)
            .with_header("Content-Type", "application/json")
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// The effective method (GET when unspecified).
    pub fn method(&self) -> HttpMethod {
        self.method.unwrap_or(HttpMethod::Get)
    }

    /// Returns true if this request only reads.
    pub fn is_read(&self) -> bool {
        self.method().is_read()
    }
}

/// Endpoint plus configuration: the identity of a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpRequest {
    pub url: String,
    pub config: RequestConfig,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>, config: RequestConfig) -> Self {
        HttpRequest {
            url: url.into(),
            config,
        }
    }
}

// =============================================================================
// Request Execution
// =============================================================================

/// Performs one request and parses the JSON response.
///
/// `payload`, when given, is sent as the JSON body.
pub async fn send_http_request<T>(
    client: &reqwest::Client,
    request: &HttpRequest,
    payload: Option<&Value>,
) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let method = request.config.method();
    debug!(method = %method, url = %request.url, has_body = payload.is_some(), "Sending request");

    let mut builder = client.request(method.into(), &request.url);
    for (name, value) in &request.config.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = payload {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            message: server_message(&bytes)
                .unwrap_or_else(|| FALLBACK_REQUEST_MESSAGE.to_string()),
        });
    }

    Ok(serde_json::from_slice(&bytes)?)
}

/// Extracts a non-empty `message` field from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned)
}
