//! Logical action names resolved to a verb and path.

use std::collections::HashMap;

use tracing::trace;

use crate::error::EndpointError;
use crate::http::HttpMethod;

/// One resolved operation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    verb: Option<HttpMethod>,
    path: String,
}

impl Action {
    pub fn new(path: impl Into<String>, verb: Option<HttpMethod>) -> Self {
        Self {
            verb,
            path: path.into(),
        }
    }

    /// `None` only for explicit-mode names with no convention verb.
    pub fn verb(&self) -> Option<&HttpMethod> {
        self.verb.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Mapping from action name to `Action`.
///
/// Iteration follows registration order. Re-adding a name replaces its
/// action in place.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    entries: Vec<(String, Action)>,
    index: HashMap<String, usize>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or overwrite the action for `name`. The verb is not validated.
    pub fn add(&mut self, name: impl Into<String>, path: impl Into<String>, verb: Option<HttpMethod>) {
        let name = name.into();
        let action = Action::new(path, verb);
        trace!(action = %name, path = action.path(), "registering action");
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].1 = action,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, action));
            }
        }
    }

    /// Look up `name`. No default action is synthesized for unknown names.
    pub fn get(&self, name: &str) -> Result<&Action, EndpointError> {
        self.index
            .get(name)
            .map(|&slot| &self.entries[slot].1)
            .ok_or_else(|| EndpointError::ActionNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.entries.iter().map(|(name, action)| (name.as_str(), action))
    }
}
