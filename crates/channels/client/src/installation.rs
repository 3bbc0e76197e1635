//! Installation identity.

/// Source of the stable identifier of this app installation.
///
/// The identifier is substituted into every subscription URL.
pub trait Installation: Send + Sync {
    /// Installation identifier.
    fn install_id(&self) -> String;
}

impl Installation for String {
    fn install_id(&self) -> String {
        self.clone()
    }
}

impl Installation for &'static str {
    fn install_id(&self) -> String {
        (*self).to_string()
    }
}
