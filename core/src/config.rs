//! Endpoint configuration and the verb conventions used to resolve it.
//!
//! # Design
//! A configuration is either a single RESTful URL shared by every action, or
//! an explicit `action -> url` map. The two modes use different convention
//! tables: in explicit mode `update` and `delete` go out as `post`, while REST
//! mode uses `patch` and `delete`. Both tables are kept as they are.
//!
//! On the wire (JSON) a string is REST mode and an object is explicit mode.
//! That distinction is made once, here, during deserialization.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::action::ActionMap;
use crate::http::HttpMethod;

pub const READ: &str = "read";
pub const BROWSE: &str = "browse";
pub const CREATE: &str = "create";
pub const UPDATE: &str = "update";
pub const DELETE: &str = "delete";

/// Verb convention for a single RESTful URL.
pub static REST_VERBS: [(&str, HttpMethod); 5] = [
    (READ, HttpMethod::Get),
    (BROWSE, HttpMethod::Get),
    (CREATE, HttpMethod::Post),
    (UPDATE, HttpMethod::Patch),
    (DELETE, HttpMethod::Delete),
];

/// Verb convention for explicitly mapped action URLs.
pub static EXPLICIT_VERBS: [(&str, HttpMethod); 5] = [
    (READ, HttpMethod::Get),
    (BROWSE, HttpMethod::Get),
    (CREATE, HttpMethod::Post),
    (UPDATE, HttpMethod::Post),
    (DELETE, HttpMethod::Post),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Rest,
    Explicit,
}

impl Mode {
    pub fn verbs(self) -> &'static [(&'static str, HttpMethod)] {
        match self {
            Mode::Rest => &REST_VERBS,
            Mode::Explicit => &EXPLICIT_VERBS,
        }
    }
}

/// Conventional verb for `name` in `mode`, if the table has one.
pub fn verb_for(mode: Mode, name: &str) -> Option<HttpMethod> {
    mode.verbs()
        .iter()
        .find(|(action, _)| *action == name)
        .map(|(_, verb)| verb.clone())
}

/// How an endpoint's actions map onto URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawConfig", into = "RawConfig")]
pub enum EndpointConfig {
    /// Every conventional action shares `base_url`.
    Rest { base_url: String },
    /// Only the listed actions are registered, each with its own URL, in
    /// the order given.
    Explicit { actions: Vec<(String, String)> },
}

impl EndpointConfig {
    pub fn rest(base_url: impl Into<String>) -> Self {
        EndpointConfig::Rest {
            base_url: base_url.into(),
        }
    }

    pub fn explicit<I, K, V>(actions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EndpointConfig::Explicit {
            actions: actions
                .into_iter()
                .map(|(name, url)| (name.into(), url.into()))
                .collect(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            EndpointConfig::Rest { .. } => Mode::Rest,
            EndpointConfig::Explicit { .. } => Mode::Explicit,
        }
    }

    /// Populate an `ActionMap` from this configuration.
    ///
    /// Explicit-mode names outside the convention table are registered with
    /// no verb rather than rejected.
    pub fn into_action_map(self) -> ActionMap {
        let mode = self.mode();
        let mut map = ActionMap::new();
        match self {
            EndpointConfig::Rest { base_url } => {
                for (name, verb) in mode.verbs() {
                    map.add(*name, base_url.clone(), Some(verb.clone()));
                }
            }
            EndpointConfig::Explicit { actions } => {
                for (name, url) in actions.into_iter().filter(|(name, _)| !name.is_empty()) {
                    let verb = verb_for(mode, &name);
                    map.add(name, url, verb);
                }
            }
        }
        map
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Rest(String),
    Explicit(ActionUrls),
}

/// A JSON object of `action -> url`, kept in document order.
#[derive(Clone)]
struct ActionUrls(Vec<(String, String)>);

impl Serialize for ActionUrls {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, url) in &self.0 {
            map.serialize_entry(name, url)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ActionUrls {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UrlsVisitor;

        impl<'de> Visitor<'de> for UrlsVisitor {
            type Value = ActionUrls;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of action names to URLs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ActionUrls, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, url)) = access.next_entry::<String, String>()? {
                    entries.push((name, url));
                }
                Ok(ActionUrls(entries))
            }
        }

        deserializer.deserialize_map(UrlsVisitor)
    }
}

impl From<RawConfig> for EndpointConfig {
    fn from(raw: RawConfig) -> Self {
        match raw {
            RawConfig::Rest(base_url) => EndpointConfig::Rest { base_url },
            RawConfig::Explicit(ActionUrls(actions)) => EndpointConfig::Explicit { actions },
        }
    }
}

impl From<EndpointConfig> for RawConfig {
    fn from(config: EndpointConfig) -> Self {
        match config {
            EndpointConfig::Rest { base_url } => RawConfig::Rest(base_url),
            EndpointConfig::Explicit { actions } => RawConfig::Explicit(ActionUrls(actions)),
        }
    }
}
