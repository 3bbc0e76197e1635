//! Channel creation options.

use channels_core::{ChannelMeta, CreateChannelBody};

/// Parameters of [`ChannelsClient::create_channel`](crate::ChannelsClient::create_channel).
#[derive(Debug, Clone, PartialEq)]
pub struct CreateChannel {
    /// Unique channel identifier.
    pub uuid: String,
    /// Subscribe the current installation as part of creation.
    pub subscribe: bool,
    /// Descriptive name.
    pub name: Option<String>,
    /// List the channel in the portal for targeting.
    pub show_in_portal: bool,
    /// Custom metadata.
    pub meta: Option<ChannelMeta>,
}

impl CreateChannel {
    /// A channel that does not show up in the portal.
    pub fn private(uuid: impl Into<String>, subscribe: bool) -> Self {
        Self {
            uuid: uuid.into(),
            subscribe,
            name: None,
            show_in_portal: false,
            meta: None,
        }
    }

    /// A named channel listed in the portal.
    pub fn in_portal(uuid: impl Into<String>, subscribe: bool, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            subscribe,
            name: Some(name.into()),
            show_in_portal: true,
            meta: None,
        }
    }

    /// Set the channel name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set custom metadata.
    pub fn with_meta(mut self, meta: ChannelMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Build the request body. `install_id` is only sent when subscribing.
    pub(crate) fn into_body(self, install_id: impl FnOnce() -> String) -> CreateChannelBody {
        CreateChannelBody {
            install_id: self.subscribe.then(install_id),
            uuid: self.uuid,
            show_in_portal: self.show_in_portal,
            name: self.name,
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_defaults() {
        let body = CreateChannel::private("news", false).into_body(|| "install-1".to_string());

        assert_eq!(body.uuid, "news");
        assert!(!body.show_in_portal);
        assert_eq!(body.name, None);
        assert_eq!(body.install_id, None);
    }

    #[test]
    fn test_subscribe_includes_install_id() {
        let body = CreateChannel::private("vip", true)
            .with_name("VIP")
            .into_body(|| "install-1".to_string());

        assert_eq!(body.name.as_deref(), Some("VIP"));
        assert_eq!(body.install_id.as_deref(), Some("install-1"));
    }

    #[test]
    fn test_in_portal() {
        let mut meta = ChannelMeta::new();
        meta.insert("colour".to_string(), "red".into());

        let body = CreateChannel::in_portal("sale", false, "Sale")
            .with_meta(meta.clone())
            .into_body(|| unreachable!("not subscribing"));

        assert!(body.show_in_portal);
        assert_eq!(body.name.as_deref(), Some("Sale"));
        assert_eq!(body.meta, Some(meta));
    }
}
