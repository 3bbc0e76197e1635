//! Push Channel Core Types
//!
//! Channel entities, wire schemas, response mapping and the pending-request
//! handle shared by the transport and client crates.

mod channel;
mod error;
pub mod mapper;
mod pending;
mod wire;

pub use channel::*;
pub use error::*;
pub use pending::*;
pub use wire::*;
