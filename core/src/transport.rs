//! The seam between the endpoint layer and whatever executes HTTP.
//!
//! # Design
//! A transport receives a fully resolved `HttpRequest` and returns its own
//! `Output` without the endpoint ever looking inside it. For an async client
//! the output is a future; for a blocking one it is an already-completed
//! `Result`. Either way, transport failures reach the caller untouched.

use crate::http::HttpRequest;

/// Executes resolved requests.
pub trait Transport {
    /// The transport's pending (or completed) result.
    type Output;

    fn request(&self, request: HttpRequest) -> Self::Output;
}

impl<F, O> Transport for F
where
    F: Fn(HttpRequest) -> O,
{
    type Output = O;

    fn request(&self, request: HttpRequest) -> O {
        self(request)
    }
}
