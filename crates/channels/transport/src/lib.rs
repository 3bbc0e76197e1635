//! Push Channel Transport
//!
//! HTTP transport abstraction used by the channels client, plus a default
//! implementation on top of reqwest.

mod config;
mod http;
mod traits;

pub use config::*;
pub use http::*;
pub use traits::*;

// Re-export for implementors
pub use channels_core::TransportError;
