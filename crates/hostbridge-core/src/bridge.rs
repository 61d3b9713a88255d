//! Bridge requestor factory.
//!
//! A [`BridgeRequestor`] binds a [`Transport`] to one namespace. It posts the
//! `{action, data}` envelope to `/api/bridges/<namespace>` and hands back
//! only the `data` field of the answer.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use crate::error::ProtocolError;
use crate::protocol::{BridgeRequest, unwrap_data};
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

/// Creates a requestor for `namespace` on top of `transport`.
pub fn make_bridge_requestor<T: Transport>(transport: T, namespace: Namespace) -> BridgeRequestor<T> {
    BridgeRequestor::new(transport, namespace)
}

/// A transport bound to one namespace endpoint.
///
/// Holds no state besides the transport and the namespace, so it is safe to
/// share and clone freely.
#[derive(Debug, Clone)]
pub struct BridgeRequestor<T> {
    transport: T,
    namespace: Namespace,
}

impl<T: Transport> BridgeRequestor<T> {
    pub fn new(transport: T, namespace: Namespace) -> Self {
        Self {
            transport,
            namespace,
        }
    }

    /// Returns the namespace this requestor posts to.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends an untyped envelope and returns the unwrapped `data` field.
    ///
    /// Transport and host failures propagate unchanged.
    pub async fn send(&self, request: &BridgeRequest) -> Result<Value> {
        let path = self.namespace.endpoint();
        trace!(namespace = %self.namespace, action = %request.action, "bridge request");

        let body = serde_json::json!({
            "action": request.action,
            "data": request.data,
        });
        let response = self.transport.post_json(&path, &body).await?;

        unwrap_data(response, self.namespace, &request.action)
    }

    /// Sends `action` with `data` and decodes the result as `R`.
    pub async fn call<A, D, R>(&self, action: A, data: D) -> Result<R>
    where
        A: Action,
        D: Serialize,
        R: DeserializeOwned,
    {
        debug_assert_eq!(A::NAMESPACE, self.namespace, "action sent to wrong namespace");

        let request = BridgeRequest::new(action.as_str(), data)?;
        let data = self.send(&request).await?;

        serde_json::from_value(data).map_err(|e| {
            ProtocolError::Shape {
                action: action.as_str().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
