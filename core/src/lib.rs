//! Configuration-driven CRUD endpoints over a pluggable HTTP transport.
//!
//! # Overview
//! An `Endpoint` maps the logical verbs `index`, `create`, `read`, `update`
//! and `delete` onto HTTP requests. It is configured either with one RESTful
//! URL (verbs chosen by convention) or with an explicit URL per action, and
//! it delegates execution to an injected `Transport`.
//!
//! # Design
//! - `ActionMap` resolves an action name to a verb and path; it is built once
//!   from an `EndpointConfig` and read-only afterwards.
//! - Validation and lookup failures (`EndpointError`) are returned
//!   synchronously, before any request is issued.
//! - Whatever the transport returns (a future, or a completed `Result`) is
//!   passed through unchanged, including transport failures.
//! - `UreqTransport` is a ready-made blocking transport; any
//!   `Fn(HttpRequest) -> O` works as one too.

pub mod action;
pub mod blocking;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;

pub use action::{Action, ActionMap};
pub use blocking::{Reply, TransportError, UreqTransport};
pub use config::{EndpointConfig, Mode};
pub use endpoint::Endpoint;
pub use error::EndpointError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::Transport;
