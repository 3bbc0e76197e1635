//! Translation of server payloads into [`PushChannel`] values.
//!
//! Everything here is pure: no I/O and no state between calls.

use serde::Deserialize as _;

use crate::{ChannelPayload, ChannelsError, PushChannel};

/// Map a single channel object.
///
/// `uuid` (non-empty string) and `subscribed` (bool) are required; `name` and
/// `meta` stay absent when the payload does not carry them.
pub fn channel_from_payload(payload: &serde_json::Value) -> Result<PushChannel, ChannelsError> {
    if !payload.is_object() {
        return Err(ChannelsError::MalformedResponse(format!(
            "expected channel object, got {}",
            json_kind(payload)
        )));
    }

    let decoded = ChannelPayload::deserialize(payload)
        .map_err(|e| ChannelsError::MalformedResponse(format!("invalid channel: {e}")))?;

    channel_from_decoded(decoded)
}

/// Map an array of channel objects, preserving order.
///
/// Fails on the first malformed element; no partial list is returned.
pub fn channels_from_payload(
    payload: &serde_json::Value,
) -> Result<Vec<PushChannel>, ChannelsError> {
    let items = payload.as_array().ok_or_else(|| {
        ChannelsError::MalformedResponse(format!(
            "expected channel array, got {}",
            json_kind(payload)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            channel_from_payload(item).map_err(|e| match e {
                ChannelsError::MalformedResponse(msg) => {
                    ChannelsError::MalformedResponse(format!("channel at index {index}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

fn channel_from_decoded(decoded: ChannelPayload) -> Result<PushChannel, ChannelsError> {
    PushChannel::new(decoded.uuid, decoded.name, decoded.subscribed, decoded.meta)
        .ok_or_else(|| ChannelsError::MalformedResponse("channel uuid is empty".to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
