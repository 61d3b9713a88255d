//! hostbridge-core - Core bridge protocol types, URL resolution and capability clients.
//!
//! A frontend reaches privileged host capabilities (filesystem, processes, a
//! key-value store, configuration and two databases) through namespaced
//! bridge endpoints. Every call is a `POST /api/bridges/<namespace>` carrying an
//! `{action, data}` envelope; the host answers `{data: <result>}` or a non-2xx
//! with a `message`.
//!
//! This crate holds everything that does not touch the network. The actual
//! HTTP call lives behind the [`Transport`] trait.
//!
//! # Example
//!
//! ```no_run
//! use hostbridge_core::capability::fs;
//! use hostbridge_core::Transport;
//!
//! # async fn example<T: Transport>(transport: T) -> hostbridge_core::Result<()> {
//! let client = fs::Client::new(transport);
//! for name in client.read_dir("/tmp").await? {
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod capability;
pub mod error;
pub mod protocol;
pub mod time;
pub mod traits;
pub mod types;
pub mod urls;

pub use bridge::{BridgeRequestor, make_bridge_requestor};
pub use error::Error;
pub use protocol::{BridgeRequest, BridgeResponse, ErrorBody};
pub use time::{Timestamp, Timestamps, timestamp};
pub use traits::{Action, Transport};
pub use types::{HostUrl, Namespace};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
