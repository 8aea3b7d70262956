//! Event normalization and enrichment.
//!
//! Turns one caller-supplied [`Event`] into the single-event wire payload
//! the collect endpoint expects: sanitized name, resolved client id, fixed
//! dimensions overlaid with per-event parameters, reserved keys stripped.

use crate::types::{CollectEvent, CollectPayload, Event, Scalar, RESERVED_KEYS};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

/// Strip every character outside `[A-Za-z0-9_]`.
///
/// GA4 event names allow letters, digits and underscores; anything else is
/// dropped rather than rejected, so `"event name 1"` becomes `"eventname1"`.
pub(crate) fn sanitize_event_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn is_valid_param(key: &str, value: &Scalar) -> bool {
    !RESERVED_KEYS.contains(&key) && !value.is_empty_string()
}

/// Build the wire payload for one event.
///
/// Returns `None` when the event has no usable name; such events are
/// skipped without touching the network.
pub(crate) fn build_payload(
    event: &Event,
    fixed_dimensions: &HashMap<String, Scalar>,
) -> Option<CollectPayload> {
    let name = sanitize_event_name(&event.name);
    if name.is_empty() {
        warn!(name = %event.name, "event has no usable name, skipping");
        return None;
    }

    let client_id = match event.client_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => Uuid::new_v4().to_string(),
    };

    // Fixed dimensions first, event params on top: per-event data wins on
    // key conflicts.
    let mut params = fixed_dimensions.clone();
    for (key, value) in &event.params {
        if is_valid_param(key, value) {
            params.insert(key.clone(), value.clone());
        } else {
            warn!(key = %key, value = ?value, "dropping invalid event parameter");
        }
    }

    let user_id = event
        .user_id
        .as_ref()
        .filter(|id| !id.is_empty())
        .cloned();

    Some(CollectPayload {
        non_personalized_ads: true,
        client_id,
        user_id,
        events: vec![CollectEvent { name, params }],
    })
}
