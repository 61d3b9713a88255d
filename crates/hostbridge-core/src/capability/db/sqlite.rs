//! `db/sqlite` namespace: SQL statements against the host's SQLite database.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{CollectionStats, CreateUniqueIndexParams, DropParams, IndexParams};
use crate::bridge::{BridgeRequestor, make_bridge_requestor};
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

/// Actions accepted by `/api/bridges/db/sqlite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqliteAction {
    Connect,
    Execute,
    Fetch,
    Drop,
    Stats,
    CreateUniqueIndexes,
}

impl Action for SqliteAction {
    const NAMESPACE: Namespace = Namespace::Sqlite;
    const ALL: &'static [Self] = &[
        SqliteAction::Connect,
        SqliteAction::Execute,
        SqliteAction::Fetch,
        SqliteAction::Drop,
        SqliteAction::Stats,
        SqliteAction::CreateUniqueIndexes,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SqliteAction::Connect => "connect",
            SqliteAction::Execute => "execute",
            SqliteAction::Fetch => "fetch",
            SqliteAction::Drop => "drop",
            SqliteAction::Stats => "stats",
            SqliteAction::CreateUniqueIndexes => "create-unique-indexes",
        }
    }
}

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub rows_affected: u64,
    pub last_insert_row: i64,
}

#[derive(Debug, Serialize)]
struct SqlParams<'a> {
    sql: &'a str,
}

/// Client for the `db/sqlite` namespace.
#[derive(Debug, Clone)]
pub struct Client<T> {
    request: BridgeRequestor<T>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            request: make_bridge_requestor(transport, SqliteAction::NAMESPACE),
        }
    }

    /// Asks the host to open the configured database.
    pub async fn connect(&self) -> Result<()> {
        self.request.call(SqliteAction::Connect, json!({})).await
    }

    /// Runs a mutating statement.
    pub async fn execute(&self, sql: &str) -> Result<ExecutionResult> {
        self.request
            .call(SqliteAction::Execute, SqlParams { sql })
            .await
    }

    /// Runs a query and decodes every row as `R`.
    pub async fn fetch<R: DeserializeOwned>(&self, sql: &str) -> Result<Vec<R>> {
        self.request
            .call(SqliteAction::Fetch, SqlParams { sql })
            .await
    }

    /// Creates unique indexes and returns their names.
    pub async fn create_unique_indexes(
        &self,
        params: &[CreateUniqueIndexParams],
    ) -> Result<Vec<String>> {
        self.request
            .call(SqliteAction::CreateUniqueIndexes, IndexParams { params })
            .await
    }

    pub async fn stats(&self) -> Result<Vec<CollectionStats>> {
        self.request.call(SqliteAction::Stats, json!({})).await
    }

    /// Drops the table `name`.
    pub async fn drop(&self, name: &str) -> Result<()> {
        self.request
            .call(SqliteAction::Drop, DropParams { name })
            .await
    }
}
