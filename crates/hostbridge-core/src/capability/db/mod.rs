//! Database namespaces: `db/mongo` (documents) and `db/sqlite` (relational).
//!
//! Both expose the same administrative actions (`connect`, `drop`, `stats`,
//! `create-unique-indexes`) with the shapes declared here. `connect` may be
//! called by any number of clients; the host owns connection reuse.

pub mod mongo;
pub mod sqlite;

use serde::{Deserialize, Serialize};

/// Row or document count of one collection or table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub name: String,
    pub count: u64,
}

/// A unique index over one or more fields of a collection or table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUniqueIndexParams {
    pub collection: String,
    pub fields: Vec<String>,
}

impl CreateUniqueIndexParams {
    pub fn new<I, S>(collection: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            collection: collection.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct IndexParams<'a> {
    params: &'a [CreateUniqueIndexParams],
}

#[derive(Debug, Serialize)]
struct DropParams<'a> {
    name: &'a str,
}
