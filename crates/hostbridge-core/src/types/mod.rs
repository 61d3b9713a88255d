//! Core bridge types.
//!
//! These types enforce addressing invariants at construction time.

mod host_url;
mod namespace;

pub use host_url::HostUrl;
pub use namespace::{BRIDGE_PREFIX, Namespace};
