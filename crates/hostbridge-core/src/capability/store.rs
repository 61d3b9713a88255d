//! `store` namespace: the host's persistent key-value store.
//!
//! Values are arbitrary JSON; each method is generic over the value type the
//! caller expects back.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::bridge::{BridgeRequestor, make_bridge_requestor};
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

/// Actions accepted by `/api/bridges/store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreAction {
    Get,
    Set,
    Remove,
    Entries,
    Keys,
}

impl Action for StoreAction {
    const NAMESPACE: Namespace = Namespace::Store;
    const ALL: &'static [Self] = &[
        StoreAction::Get,
        StoreAction::Set,
        StoreAction::Remove,
        StoreAction::Entries,
        StoreAction::Keys,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            StoreAction::Get => "get",
            StoreAction::Set => "set",
            StoreAction::Remove => "remove",
            StoreAction::Entries => "entries",
            StoreAction::Keys => "keys",
        }
    }
}

#[derive(Debug, Serialize)]
struct KeyParams<'a> {
    key: &'a str,
}

#[derive(Debug, Serialize)]
struct SetParams<'a, V> {
    key: &'a str,
    value: &'a V,
}

/// Client for the `store` namespace.
#[derive(Debug, Clone)]
pub struct Client<T> {
    request: BridgeRequestor<T>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            request: make_bridge_requestor(transport, StoreAction::NAMESPACE),
        }
    }

    /// Returns the value under `key`, or `None` when absent.
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        self.request.call(StoreAction::Get, KeyParams { key }).await
    }

    pub async fn set<V: Serialize>(&self, key: &str, value: &V) -> Result<()> {
        self.request
            .call(StoreAction::Set, SetParams { key, value })
            .await
    }

    /// Removes `key` and returns its previous value, or `None` when absent.
    pub async fn remove<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        self.request
            .call(StoreAction::Remove, KeyParams { key })
            .await
    }

    /// Returns the whole mapping.
    pub async fn entries<V: DeserializeOwned>(&self) -> Result<BTreeMap<String, V>> {
        self.request.call(StoreAction::Entries, json!({})).await
    }

    pub async fn keys(&self) -> Result<Vec<String>> {
        self.request.call(StoreAction::Keys, json!({})).await
    }
}
