//! Transport trait.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Performs the network call underneath a bridge requestor.
///
/// Implementations issue exactly one request per call: no retries, no
/// caching, no coalescing of identical in-flight requests. Failures must
/// already be normalized into [`crate::Error::Transport`] or
/// [`crate::Error::Host`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to a same-origin path and return the decoded JSON
    /// body of a 2xx answer.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        (**self).post_json(path, body).await
    }
}

#[async_trait]
impl<'a, T: Transport + ?Sized> Transport for &'a T {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        (**self).post_json(path, body).await
    }
}
