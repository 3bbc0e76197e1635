//! Request and response bodies of the push channel API.

use crate::ChannelMeta;

/// Channel object returned by `GET /app-installs/{id}/channels` and `POST /channels`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChannelPayload {
    /// Unique channel identifier.
    pub uuid: String,

    /// Whether the requesting installation is subscribed.
    pub subscribed: bool,

    /// Optional channel name.
    #[serde(default, deserialize_with = "lenient::name")]
    pub name: Option<String>,

    /// Optional custom metadata.
    #[serde(default, deserialize_with = "lenient::meta")]
    pub meta: Option<ChannelMeta>,
}

/// Body of `POST /channels`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelBody {
    /// Unique channel identifier.
    pub uuid: String,

    /// Whether the channel is listed in the portal for targeting.
    pub show_in_portal: bool,

    /// Optional channel name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ChannelMeta>,

    /// Installation to subscribe as part of creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_id: Option<String>,
}

/// Body of every `/app-installs/{id}/channels/subscriptions` call.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SubscriptionBody {
    /// Channel identifiers the operation applies to.
    pub uuids: Vec<String>,
}

/// Optional fields of a channel payload.
///
/// A value of the wrong type is treated as absent; only `uuid` and
/// `subscribed` are strict.
mod lenient {
    use serde::{Deserialize, Deserializer};

    use crate::ChannelMeta;

    pub fn name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(name) => Ok(Some(name)),
            _ => Ok(None),
        }
    }

    pub fn meta<'de, D>(deserializer: D) -> Result<Option<ChannelMeta>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Object(meta) => Ok(Some(meta)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_omits_absent_fields() {
        let body = CreateChannelBody {
            uuid: "news".to_string(),
            show_in_portal: false,
            name: None,
            meta: None,
            install_id: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"uuid": "news", "showInPortal": false}));
    }

    #[test]
    fn test_create_body_field_names() {
        let body = CreateChannelBody {
            uuid: "vip".to_string(),
            show_in_portal: true,
            name: Some("VIP".to_string()),
            meta: Some(serde_json::json!({"tier": 1}).as_object().unwrap().clone()),
            install_id: Some("install-1".to_string()),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "uuid": "vip",
                "showInPortal": true,
                "name": "VIP",
                "meta": {"tier": 1},
                "installId": "install-1",
            })
        );
    }
}
