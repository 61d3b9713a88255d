//! `config` namespace: the host's application configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::bridge::{BridgeRequestor, make_bridge_requestor};
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

/// Actions accepted by `/api/bridges/config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigAction {
    Get,
}

impl Action for ConfigAction {
    const NAMESPACE: Namespace = Namespace::Config;
    const ALL: &'static [Self] = &[ConfigAction::Get];

    fn as_str(&self) -> &'static str {
        match self {
            ConfigAction::Get => "get",
        }
    }
}

/// Application configuration as served by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub port: u16,
    pub db: DbConfig,
    pub theme: ThemeConfig,
    /// Free-form variables grouped by name space, e.g. `vars["default"]["root"]`.
    #[serde(default)]
    pub vars: BTreeMap<String, BTreeMap<String, String>>,
}

impl Config {
    /// Looks up a variable in a variable group.
    pub fn var(&self, group: &str, key: &str) -> Option<&str> {
        self.vars.get(group)?.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub mongo: MongoConfig,
    pub sqlite: SqliteConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoConfig {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub font_size: String,
}

/// Client for the `config` namespace.
#[derive(Debug, Clone)]
pub struct Client<T> {
    request: BridgeRequestor<T>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            request: make_bridge_requestor(transport, ConfigAction::NAMESPACE),
        }
    }

    /// Fetch the full application configuration.
    pub async fn get(&self) -> Result<Config> {
        self.request.call(ConfigAction::Get, json!({})).await
    }
}
