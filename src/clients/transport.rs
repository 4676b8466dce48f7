//! HTTP transport abstraction.
//!
//! The SDK never talks to the network directly. Every exchange goes through
//! an [`HttpTransport`], which makes the pipeline testable with an in-memory
//! transport and lets callers plug in their own HTTP stack.
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::clients::{BodyEncoding, HttpMethod, TransportRequest};
//!
//! let request = TransportRequest::builder(HttpMethod::Get, "https://api.example.com/api/v1/accounts")
//!     .param("page", 1)
//!     .param("order", "desc")
//!     .encoding(BodyEncoding::Form)
//!     .build();
//!
//! assert_eq!(request.url, "https://api.example.com/api/v1/accounts?page=1&order=desc");
//! assert!(request.params.is_empty());
//! ```

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::errors::{ProtocolError, TransportError};

/// HTTP methods used by the bank API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for grants and resource queries with a body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// How request parameters are encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`.
    #[default]
    Form,
    /// `application/json`.
    Json,
}

impl BodyEncoding {
    /// Returns the `Content-Type` header value for this encoding.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Form => "application/x-www-form-urlencoded; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
        }
    }
}

/// A fully prepared HTTP request handed to an [`HttpTransport`].
///
/// Parameters that belong in the query string have already been moved into
/// `url` by [`TransportRequestBuilder::build`]; whatever remains in `params`
/// is sent as the body using `encoding`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    /// The absolute request URL.
    pub url: String,
    /// The HTTP method.
    pub method: HttpMethod,
    /// Body parameters in insertion order.
    pub params: Vec<(String, Value)>,
    /// Headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Body encoding.
    pub encoding: BodyEncoding,
}

impl TransportRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> TransportRequestBuilder {
        TransportRequestBuilder::new(method, url)
    }

    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Encodes the body parameters.
    ///
    /// Returns `None` for a GET without body parameters. A POST always
    /// carries a body, even if it is empty.
    #[must_use]
    pub fn body(&self) -> Option<String> {
        if self.params.is_empty() && self.method == HttpMethod::Get {
            return None;
        }
        Some(match self.encoding {
            BodyEncoding::Form => encode_form(&self.params),
            BodyEncoding::Json => encode_json(&self.params),
        })
    }
}

/// Builder for [`TransportRequest`].
#[derive(Debug)]
pub struct TransportRequestBuilder {
    url: String,
    method: HttpMethod,
    params: Vec<(String, Value)>,
    headers: Vec<(String, String)>,
    encoding: BodyEncoding,
}

impl TransportRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            params: Vec::new(),
            headers: Vec::new(),
            encoding: BodyEncoding::default(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Appends several parameters, keeping their order.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.params.extend(params);
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the body encoding.
    #[must_use]
    pub const fn encoding(mut self, encoding: BodyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Finalizes the request.
    ///
    /// A form-encoded GET with parameters has them moved into the query
    /// string. The `Content-Type` header for the encoding is appended last.
    #[must_use]
    pub fn build(mut self) -> TransportRequest {
        if self.method == HttpMethod::Get
            && self.encoding == BodyEncoding::Form
            && !self.params.is_empty()
        {
            let query = encode_form(&self.params);
            let separator = if self.url.contains('?') { '&' } else { '?' };
            self.url = format!("{}{separator}{query}", self.url);
            self.params.clear();
        }

        self.headers.push((
            "Content-Type".to_string(),
            self.encoding.as_content_type().to_string(),
        ));

        TransportRequest {
            url: self.url,
            method: self.method,
            params: self.params,
            headers: self.headers,
            encoding: self.encoding,
        }
    }
}

/// A raw response: status code and body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body, possibly empty.
    pub body: String,
}

impl TransportResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::EmptyBody`] for a blank body and
    /// [`ProtocolError::InvalidJson`] for anything that is not JSON.
    pub fn json(&self) -> Result<Value, ProtocolError> {
        if self.body.trim().is_empty() {
            return Err(ProtocolError::EmptyBody {
                status: self.status,
            });
        }
        serde_json::from_str(&self.body).map_err(|e| ProtocolError::InvalidJson {
            status: self.status,
            message: e.to_string(),
        })
    }
}

/// Sends prepared requests over the wire.
///
/// Implementations must not interpret the response body or status; that is
/// left to the caller. A transport error means no usable response arrived.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Sends the request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the exchange could not be completed.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Renders a scalar JSON value the way it appears in form and query strings.
///
/// `null` renders as nothing and is skipped by [`encode_form`].
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Encodes parameters as `application/x-www-form-urlencoded`.
pub(crate) fn encode_form(params: &[(String, Value)]) -> String {
    params
        .iter()
        .filter_map(|(name, value)| {
            scalar_to_string(value).map(|value| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(&value)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_json(params: &[(String, Value)]) -> String {
    let object: serde_json::Map<String, Value> = params.iter().cloned().collect();
    Value::Object(object).to_string()
}
