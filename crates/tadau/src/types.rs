//! Event and wire payload types.

use serde::Serialize;
use std::collections::HashMap;

/// GA4-reserved parameter names that callers may not set.
pub const RESERVED_KEYS: [&str; 3] = ["app_instance_id", "uuid", "timestamp_micros"];

/// A single telemetry parameter value.
///
/// GA4 event parameters are flat scalars; nested structures are not
/// representable on the wire, so the variant set is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Whether this value is the empty string.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Scalar::String(s) if s.is_empty())
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// One caller-supplied event.
///
/// `name` is required for delivery; events whose name is empty (or becomes
/// empty after sanitization) are skipped. `client_id` and `user_id` are
/// carried at the top level of the wire payload, everything added via
/// [`Event::param`] lands in the event's `params`.
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub(crate) name: String,
    pub(crate) client_id: Option<String>,
    pub(crate) user_id: Option<String>,
    pub(crate) params: HashMap<String, Scalar>,
}

impl Event {
    /// Create an event with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the GA4 client identifier. When absent a random UUID is
    /// generated at send time.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Set the user identifier.
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Add an event parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Get the event name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Wire event inside a collect payload.
#[derive(Debug, Clone, Serialize)]
pub struct CollectEvent {
    pub name: String,
    pub params: HashMap<String, Scalar>,
}

/// Payload sent to the collect endpoint.
///
/// `events` always has exactly one element; logical events are never
/// batched into a single request.
#[derive(Debug, Clone, Serialize)]
pub struct CollectPayload {
    pub non_personalized_ads: bool,
    pub client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub events: Vec<CollectEvent>,
}
