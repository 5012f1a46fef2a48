//! Error types for the endpoint layer.
//!
//! # Design
//! Every variant here is raised synchronously, before a transport is ever
//! invoked, so configuration and call-site mistakes never hide inside a
//! pending result. Transport failures are not represented: they travel
//! unchanged in the transport's own output type.

use thiserror::Error;

/// Errors returned by `Endpoint` and `ActionMap`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// A required call argument was missing or had the wrong shape.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// The requested action was never registered.
    #[error("action not found: {name}")]
    ActionNotFound { name: String },

    /// The call argument could not be converted to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl EndpointError {
    pub(crate) fn missing_data() -> Self {
        EndpointError::InvalidArgument {
            message: "Missing data parameter".to_string(),
        }
    }

    pub(crate) fn missing_id() -> Self {
        EndpointError::InvalidArgument {
            message: "Missing id parameter".to_string(),
        }
    }
}
