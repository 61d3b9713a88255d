//! `db/mongo` namespace: document collections in the host's MongoDB.
//!
//! Documents returned by the host carry their primary key under
//! [`PRIMARY_KEY`]; [`WithId`] models that. Writes that should be
//! attributable in time go through [`MutateItems`], which stamps `ct`/`mt`
//! right before the request.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{CollectionStats, CreateUniqueIndexParams, DropParams, IndexParams};
use crate::bridge::{BridgeRequestor, make_bridge_requestor};
use crate::capability::PaginationParams;
use crate::error::InvalidInputError;
use crate::time::timestamp;
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

pub const PRIMARY_KEY: &str = "_id";

pub const CREATED_TIME_KEY: &str = "ct";

pub const MODIFIED_TIME_KEY: &str = "mt";

/// Actions accepted by `/api/bridges/db/mongo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MongoAction {
    Connect,
    Find,
    Add,
    Update,
    Remove,
    Drop,
    Stats,
    CreateUniqueIndexes,
}

impl Action for MongoAction {
    const NAMESPACE: Namespace = Namespace::Mongo;
    const ALL: &'static [Self] = &[
        MongoAction::Connect,
        MongoAction::Find,
        MongoAction::Add,
        MongoAction::Update,
        MongoAction::Remove,
        MongoAction::Drop,
        MongoAction::Stats,
        MongoAction::CreateUniqueIndexes,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            MongoAction::Connect => "connect",
            MongoAction::Find => "find",
            MongoAction::Add => "add",
            MongoAction::Update => "update",
            MongoAction::Remove => "remove",
            MongoAction::Drop => "drop",
            MongoAction::Stats => "stats",
            MongoAction::CreateUniqueIndexes => "create-unique-indexes",
        }
    }
}

/// A document together with its primary key.
///
/// Key uniqueness is guaranteed by the database, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithId<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub doc: T,
}

impl<T> WithId<T> {
    pub fn new(id: impl Into<String>, doc: T) -> Self {
        Self { id: id.into(), doc }
    }

    pub fn into_inner(self) -> T {
        self.doc
    }
}

impl<T> Deref for WithId<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.doc
    }
}

impl<T> DerefMut for WithId<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.doc
    }
}

/// Selection for `find`.
///
/// Without a limit the host returns the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryItemsParams {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    /// Field name to direction (`1` ascending, `-1` descending).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<BTreeMap<String, i32>>,
}

impl QueryItemsParams {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.pagination = Some(PaginationParams::new(page, limit));
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters
            .get_or_insert_with(Map::new)
            .insert(field.into(), value.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: i32) -> Self {
        self.sort
            .get_or_insert_with(BTreeMap::new)
            .insert(field.into(), direction);
        self
    }
}

/// Documents to add, update or remove in one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutateItemsParams<T> {
    pub collection: String,
    pub data: Vec<T>,
}

impl<T> MutateItemsParams<T> {
    pub fn new(collection: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            collection: collection.into(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
struct Wrapped<P> {
    params: P,
}

#[derive(Debug, Serialize)]
struct ItemsRef<'a, S> {
    collection: &'a str,
    data: &'a [S],
}

/// Client for the `db/mongo` namespace.
#[derive(Debug, Clone)]
pub struct Client<T> {
    request: BridgeRequestor<T>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            request: make_bridge_requestor(transport, MongoAction::NAMESPACE),
        }
    }

    /// Asks the host to open the configured database.
    pub async fn connect(&self) -> Result<()> {
        self.request.call(MongoAction::Connect, json!({})).await
    }

    pub async fn find<D: DeserializeOwned>(
        &self,
        params: &QueryItemsParams,
    ) -> Result<Vec<WithId<D>>> {
        self.request
            .call(MongoAction::Find, Wrapped { params })
            .await
    }

    /// Inserts documents as given; see [`MutateItems::add`] for the stamped path.
    pub async fn add<D>(&self, params: &MutateItemsParams<D>) -> Result<Vec<WithId<D>>>
    where
        D: Serialize + DeserializeOwned,
    {
        self.request
            .call(MongoAction::Add, Wrapped { params })
            .await
    }

    /// Replaces documents by primary key; see [`MutateItems::update`] for the stamped path.
    pub async fn update<D>(&self, params: &MutateItemsParams<WithId<D>>) -> Result<Vec<WithId<D>>>
    where
        D: Serialize + DeserializeOwned,
    {
        self.request
            .call(MongoAction::Update, Wrapped { params })
            .await
    }

    pub async fn remove<D>(&self, params: &MutateItemsParams<WithId<D>>) -> Result<Vec<WithId<D>>>
    where
        D: Serialize + DeserializeOwned,
    {
        self.request
            .call(MongoAction::Remove, Wrapped { params })
            .await
    }

    /// Creates unique indexes and returns their names.
    pub async fn create_unique_indexes(
        &self,
        params: &[CreateUniqueIndexParams],
    ) -> Result<Vec<String>> {
        self.request
            .call(MongoAction::CreateUniqueIndexes, IndexParams { params })
            .await
    }

    pub async fn stats(&self) -> Result<Vec<CollectionStats>> {
        self.request.call(MongoAction::Stats, json!({})).await
    }

    /// Drops the whole collection `name`.
    pub async fn drop(&self, name: &str) -> Result<()> {
        self.request
            .call(MongoAction::Drop, DropParams { name })
            .await
    }

    /// Returns the stamped write-path for one collection.
    pub fn collection<D>(&self, name: impl Into<String>) -> MutateItems<'_, T, D> {
        MutateItems {
            client: self,
            collection: name.into(),
            _doc: PhantomData,
        }
    }
}

/// Which timestamps a write sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    /// Sets both `ct` and `mt`.
    Create,
    /// Sets `mt` only.
    Update,
}

/// Serializes documents and writes `now` into their timestamp fields.
///
/// Any `ct`/`mt` the caller supplied is overwritten, whatever the declared
/// document type says.
pub fn stamp_documents<D: Serialize>(docs: &[D], now: &str, stamp: Stamp) -> Result<Vec<Value>> {
    docs.iter()
        .enumerate()
        .map(|(index, doc)| -> Result<Value> {
            let mut value = serde_json::to_value(doc).map_err(|e| InvalidInputError::Params {
                action: "stamp".to_string(),
                reason: e.to_string(),
            })?;
            let map = value
                .as_object_mut()
                .ok_or(InvalidInputError::Document { index })?;

            if stamp == Stamp::Create {
                map.insert(CREATED_TIME_KEY.to_string(), Value::from(now));
            }
            map.insert(MODIFIED_TIME_KEY.to_string(), Value::from(now));

            Ok(value)
        })
        .collect()
}

/// Collection-bound write-path that timestamps every write.
///
/// `add` sets `ct` and `mt`; `update` refreshes `mt` and leaves `ct` as sent.
/// Both silently discard caller-supplied values for the stamped fields.
#[derive(Debug)]
pub struct MutateItems<'a, T, D> {
    client: &'a Client<T>,
    collection: String,
    _doc: PhantomData<fn() -> D>,
}

impl<T, D> MutateItems<'_, T, D>
where
    T: Transport,
    D: Serialize + DeserializeOwned,
{
    pub fn name(&self) -> &str {
        &self.collection
    }

    pub async fn add(&self, docs: &[D]) -> Result<Vec<WithId<D>>> {
        self.write(MongoAction::Add, docs, Stamp::Create).await
    }

    pub async fn update(&self, docs: &[WithId<D>]) -> Result<Vec<WithId<D>>> {
        self.write(MongoAction::Update, docs, Stamp::Update).await
    }

    pub async fn remove(&self, docs: &[WithId<D>]) -> Result<Vec<WithId<D>>> {
        self.client
            .request
            .call(
                MongoAction::Remove,
                Wrapped {
                    params: ItemsRef {
                        collection: &self.collection,
                        data: docs,
                    },
                },
            )
            .await
    }

    pub async fn drop(&self) -> Result<()> {
        self.client.drop(&self.collection).await
    }

    async fn write<S: Serialize>(
        &self,
        action: MongoAction,
        docs: &[S],
        stamp: Stamp,
    ) -> Result<Vec<WithId<D>>> {
        let data = stamp_documents(docs, &timestamp(), stamp)?;
        let params = ItemsRef {
            collection: &self.collection,
            data: &data,
        };

        self.client.request.call(action, Wrapped { params }).await
    }
}
