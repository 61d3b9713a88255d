//! hostbridge-http - reqwest-backed request executor for hostbridge.
//!
//! [`HttpClient`] performs exactly one HTTP call per request and normalizes
//! every failure into a message-only [`Error`](hostbridge_core::Error). It
//! implements [`Transport`](hostbridge_core::Transport), so every capability
//! client in `hostbridge-core` can run on top of it. [`Bridge`] builds the
//! six long-lived clients once and shares one connection pool between them.
//!
//! # Example
//!
//! ```no_run
//! use hostbridge_core::HostUrl;
//! use hostbridge_http::Bridge;
//!
//! # async fn example() -> hostbridge_core::Result<()> {
//! let bridge = Bridge::new(HostUrl::new("http://127.0.0.1:3000")?)?;
//! let config = bridge.config().get().await?;
//! println!("host listens on {}", config.port);
//! # Ok(())
//! # }
//! ```

mod bridge;
mod client;
mod error;
mod request;

pub use bridge::{Bridge, ConfigClient, FsClient, MongoClient, ProcessClient, SqliteClient, StoreClient};
pub use client::{HttpClient, HttpClientBuilder};
pub use request::{Method, Payload, RequestBody, RequestOptions, Response, ResponseType};
