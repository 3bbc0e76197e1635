//! Push channel entity.

/// Opaque channel metadata as stored by the server.
pub type ChannelMeta = serde_json::Map<String, serde_json::Value>;

/// A push channel as seen by the current installation.
///
/// Values are produced by [`crate::mapper`] from server payloads and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PushChannel {
    uuid: String,
    name: Option<String>,
    is_subscribed: bool,
    meta: Option<ChannelMeta>,
}

impl PushChannel {
    /// Create a channel. Returns `None` if `uuid` is empty.
    pub fn new(
        uuid: impl Into<String>,
        name: Option<String>,
        is_subscribed: bool,
        meta: Option<ChannelMeta>,
    ) -> Option<Self> {
        let uuid = uuid.into();
        if uuid.is_empty() {
            return None;
        }

        Some(Self {
            uuid,
            name,
            is_subscribed,
            meta,
        })
    }

    /// Unique channel identifier.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// Human-readable name, if the channel was created with one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the current installation is subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.is_subscribed
    }

    /// Custom metadata attached at creation.
    pub fn meta(&self) -> Option<&ChannelMeta> {
        self.meta.as_ref()
    }
}

impl std::fmt::Display for PushChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", name, self.uuid),
            None => write!(f, "{}", self.uuid),
        }
    }
}
