//! HTTP request and response types described as plain data.
//!
//! # Design
//! The endpoint layer resolves an action into an `HttpRequest` and hands it
//! to a transport; it never touches the network itself. `HttpResponse` is the
//! shape a transport reports back when it surfaces the raw response.
//!
//! All fields use owned types (`String`, `Vec`, `serde_json::Value`) so values
//! can move into transports and across threads without lifetime concerns.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// HTTP method for a request.
///
/// Verbs are advisory at this layer: any token is accepted and unknown ones
/// are carried as `Extension`, leaving rejection to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Extension(String),
}

impl HttpMethod {
    /// Parse a method token, case-insensitively. Never fails.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "get" => HttpMethod::Get,
            "post" => HttpMethod::Post,
            "put" => HttpMethod::Put,
            "patch" => HttpMethod::Patch,
            "delete" => HttpMethod::Delete,
            other => HttpMethod::Extension(other.to_string()),
        }
    }

    /// Lowercase method token, e.g. `"patch"`.
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Extension(token) => token,
        }
    }

    /// Whether request data travels in the query string rather than a body.
    pub fn sends_query(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HttpMethod::from_token(s))
    }
}

impl Serialize for HttpMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(HttpMethod::from_token(&token))
    }
}

/// A resolved request handed to a `Transport`.
///
/// `data` is passed through exactly as the caller supplied it; how it is
/// encoded (path, query string, body) is the transport's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub data: Option<Value>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
