//! Push Channels Client
//!
//! Lists and creates push channels and manages the current installation's
//! channel subscriptions. Every operation returns a
//! [`PendingRequest`](channels_core::PendingRequest) immediately and resolves
//! it once the transport completes.

mod client;
mod config;
mod installation;
mod options;

pub use client::*;
pub use config::*;
pub use installation::*;
pub use options::*;

// Re-export for convenience
pub use channels_core;
pub use channels_transport;
