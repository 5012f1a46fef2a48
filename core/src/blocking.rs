//! Blocking HTTP transport backed by `ureq`.
//!
//! # Design
//! Request data is shaped the way REST resources usually expect it:
//! - `:name` path placeholders are filled from object fields of the same name,
//!   or from scalar data (first placeholder).
//! - Scalar data with no placeholder becomes a trailing path segment, so a
//!   single RESTful URL like `/widgets` reads `7` as `/widgets/7`.
//! - Whatever object data is left goes into the query string for `get` and
//!   `delete`, and into a JSON body otherwise.
//!
//! Relative paths are joined to the transport's base URL; absolute URLs are
//! used as-is. Non-2xx statuses come back as `TransportError::Status`.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace};

use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Failures raised while executing a request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request data cannot be encoded for this method.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or protocol failure inside the HTTP client.
    #[error("http transport failed: {0}")]
    Http(#[from] ureq::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// What a successful request yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The full response.
    Response(HttpResponse),
    /// Only the decoded JSON body (`Null` for an empty body).
    Data(Value),
}

impl Reply {
    pub fn into_data(self) -> Result<Value, TransportError> {
        match self {
            Reply::Data(value) => Ok(value),
            Reply::Response(response) => decode_body(&response.body),
        }
    }
}

/// Synchronous transport executing requests with a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    base_url: String,
    extract_data: bool,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .field("extract_data", &self.extract_data)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            extract_data: false,
        }
    }

    /// Reply with the decoded body instead of the response.
    pub fn extract_data(mut self, extract: bool) -> Self {
        self.extract_data = extract;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn execute(&self, request: HttpRequest) -> Result<Reply, TransportError> {
        let shaped = shape(&self.base_url, &request)?;
        debug!(method = %request.method, url = %shaped.url, "sending request");

        let mut response = match (&request.method, shaped.body) {
            (HttpMethod::Get, _) => self.agent.get(&shaped.url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&shaped.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&shaped.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&shaped.url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&shaped.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&shaped.url).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(&shaped.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(&shaped.url).send_empty(),
            (HttpMethod::Extension(token), body) => {
                let request = extension_request(token, &shaped.url, body)?;
                self.agent.run(request)
            }
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_string()?;
        trace!(status, "received response");

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        if !response.is_success() {
            return Err(TransportError::Status {
                status,
                body: response.body,
            });
        }
        if self.extract_data {
            return decode_body(&response.body).map(Reply::Data);
        }
        Ok(Reply::Response(response))
    }
}

impl Transport for UreqTransport {
    type Output = Result<Reply, TransportError>;

    fn request(&self, request: HttpRequest) -> Self::Output {
        self.execute(request)
    }
}

fn extension_request(
    token: &str,
    url: &str,
    body: Option<String>,
) -> Result<ureq::http::Request<Vec<u8>>, TransportError> {
    let mut builder = ureq::http::Request::builder()
        .method(token.to_ascii_uppercase().as_str())
        .uri(url);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    builder
        .body(body.unwrap_or_default().into_bytes())
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))
}

/// A request ready for the wire.
#[derive(Debug, PartialEq, Eq)]
struct Shaped {
    url: String,
    body: Option<String>,
}

fn shape(base_url: &str, request: &HttpRequest) -> Result<Shaped, TransportError> {
    let mut path = request.path.clone();
    let remaining = match request.data.clone() {
        Some(Value::Object(mut fields)) => {
            for name in placeholders(&request.path) {
                if let Some(value) = fields.remove(&name) {
                    path = fill_placeholder(&path, &name, &segment(&value));
                }
            }
            (!fields.is_empty()).then_some(Value::Object(fields))
        }
        Some(scalar @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => {
            let value = segment(&scalar);
            path = match placeholders(&path).first() {
                Some(name) => fill_placeholder(&path, name, &value),
                None => append_segment(&path, &value),
            };
            None
        }
        other => other,
    };

    let unfilled = placeholders(&path);
    if !unfilled.is_empty() {
        return Err(TransportError::InvalidRequest(format!(
            "no value for path placeholder :{} in {}",
            unfilled.join(", :"),
            request.path
        )));
    }

    let mut url = join_url(base_url, &path);
    let body = match remaining {
        None | Some(Value::Null) => None,
        Some(Value::Object(fields)) if request.method.sends_query() => {
            let query = query_string(&fields);
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
            None
        }
        Some(value) if request.method.sends_query() => {
            return Err(TransportError::InvalidRequest(format!(
                "cannot encode {value} in a {} query string",
                request.method
            )));
        }
        Some(value) => Some(value.to_string()),
    };
    Ok(Shaped { url, body })
}

fn placeholders(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(|part| part.strip_prefix(':'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn fill_placeholder(path: &str, name: &str, value: &str) -> String {
    let encoded = urlencoding::encode(value);
    path.split('/')
        .map(|part| match part.strip_prefix(':') {
            Some(placeholder) if placeholder == name => &*encoded,
            _ => part,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// The segment goes before any query string already in the path.
fn append_segment(path: &str, value: &str) -> String {
    let (base, query) = match path.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (path, None),
    };
    let mut joined = format!("{}/{}", base.trim_end_matches('/'), urlencoding::encode(value));
    if let Some(query) = query {
        joined.push('?');
        joined.push_str(query);
    }
    joined
}

fn segment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn query_string(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&segment(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base_url.is_empty() {
        return path.to_string();
    }
    format!("{base_url}/{}", path.trim_start_matches('/'))
}

fn decode_body(body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}
