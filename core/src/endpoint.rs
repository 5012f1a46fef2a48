//! CRUD-shaped access to a single configured resource.
//!
//! # Design
//! `Endpoint` owns an `ActionMap`, built once from an `EndpointConfig` or
//! handed over ready-made, and a transport injected by the caller. It holds no other state: every call is a
//! read-only lookup followed by one transport request.
//!
//! Dispatch is split the same way as the rest of the crate: `prepare`
//! resolves an action into an `HttpRequest` without I/O, and `call` hands
//! that request to the transport. Argument validation and lookup failures are
//! returned before the transport is touched.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::action::ActionMap;
use crate::config::{EndpointConfig, BROWSE, CREATE, DELETE, READ, UPDATE};
use crate::error::EndpointError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;

/// Browse and CRUD calls for one resource.
#[derive(Debug, Clone)]
pub struct Endpoint<T> {
    transport: T,
    actions: ActionMap,
}

impl<T: Transport> Endpoint<T> {
    pub fn new(transport: T, config: EndpointConfig) -> Self {
        Self::from_actions(transport, config.into_action_map())
    }

    /// A group of arbitrary actions, each with the verb it was added with.
    pub fn from_actions(transport: T, actions: ActionMap) -> Self {
        Self { transport, actions }
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve `name` into the request `call` would send.
    ///
    /// Actions registered without a verb go out as `get`, the default of the
    /// HTTP clients this layer sits on.
    pub fn prepare(&self, name: &str, data: Option<Value>) -> Result<HttpRequest, EndpointError> {
        let action = self.actions.get(name)?;
        Ok(HttpRequest {
            method: action.verb().cloned().unwrap_or(HttpMethod::Get),
            path: action.path().to_string(),
            data,
        })
    }

    /// Look up `name` and issue its request, returning the transport's output.
    pub fn call(&self, name: &str, data: Option<Value>) -> Result<T::Output, EndpointError> {
        let request = self.prepare(name, data)?;
        debug!(action = name, method = %request.method, path = %request.path, "dispatching");
        Ok(self.transport.request(request))
    }

    /// Browse the resource index. `data` is not validated.
    pub fn index<D: Serialize>(&self, data: Option<D>) -> Result<T::Output, EndpointError> {
        let data = data.map(|d| to_value(&d)).transpose()?;
        self.call(BROWSE, data)
    }

    /// Create a resource. `data` must serialize to a JSON object.
    pub fn create<D: Serialize>(&self, data: D) -> Result<T::Output, EndpointError> {
        let data = require_object(&data)?;
        self.call(CREATE, Some(data))
    }

    /// Read a single resource. Any id is accepted except an absent one.
    pub fn read<I: Serialize>(&self, id: I) -> Result<T::Output, EndpointError> {
        let id = require_id(&id)?;
        self.call(READ, Some(id))
    }

    /// Update a resource. `data` must serialize to a JSON object.
    pub fn update<D: Serialize>(&self, data: D) -> Result<T::Output, EndpointError> {
        let data = require_object(&data)?;
        self.call(UPDATE, Some(data))
    }

    /// Delete a resource. Any id is accepted except an absent one.
    pub fn delete<I: Serialize>(&self, id: I) -> Result<T::Output, EndpointError> {
        let id = require_id(&id)?;
        self.call(DELETE, Some(id))
    }
}

fn to_value<D: Serialize>(data: &D) -> Result<Value, EndpointError> {
    serde_json::to_value(data).map_err(|e| EndpointError::Serialization(e.to_string()))
}

fn require_object<D: Serialize>(data: &D) -> Result<Value, EndpointError> {
    match to_value(data)? {
        value @ Value::Object(_) => Ok(value),
        _ => Err(EndpointError::missing_data()),
    }
}

// `None` and `()` both serialize to null, which is the only absent id.
fn require_id<I: Serialize>(id: &I) -> Result<Value, EndpointError> {
    match to_value(id)? {
        Value::Null => Err(EndpointError::missing_id()),
        value => Ok(value),
    }
}
