//! Long-lived capability clients sharing one executor.

use bytes::Bytes;

use hostbridge_core::capability::db::{mongo, sqlite};
use hostbridge_core::capability::{config, fs, process, store};
use hostbridge_core::urls::resolve_asset_url;
use hostbridge_core::{BridgeRequestor, HostUrl, Namespace, Result, make_bridge_requestor};

use crate::client::HttpClient;
use crate::request::{Payload, RequestOptions, Response, ResponseType};

pub type ConfigClient = config::Client<HttpClient>;
pub type FsClient = fs::Client<HttpClient>;
pub type ProcessClient = process::Client<HttpClient>;
pub type StoreClient = store::Client<HttpClient>;
pub type MongoClient = mongo::Client<HttpClient>;
pub type SqliteClient = sqlite::Client<HttpClient>;

/// One client per namespace, built once and shared.
///
/// The clients hold nothing but a handle on the shared [`HttpClient`], so a
/// `Bridge` can be cloned into every part of an application.
#[derive(Debug, Clone)]
pub struct Bridge {
    http: HttpClient,
    config: ConfigClient,
    fs: FsClient,
    process: ProcessClient,
    store: StoreClient,
    mongo: MongoClient,
    sqlite: SqliteClient,
}

impl Bridge {
    /// Create a bridge to `host` with a default executor.
    pub fn new(host: HostUrl) -> Result<Self> {
        Ok(Self::with_client(HttpClient::new(host)?))
    }

    /// Create a bridge on top of a configured executor.
    pub fn with_client(http: HttpClient) -> Self {
        Self {
            config: config::Client::new(http.clone()),
            fs: fs::Client::new(http.clone()),
            process: process::Client::new(http.clone()),
            store: store::Client::new(http.clone()),
            mongo: mongo::Client::new(http.clone()),
            sqlite: sqlite::Client::new(http.clone()),
            http,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn config(&self) -> &ConfigClient {
        &self.config
    }

    pub fn fs(&self) -> &FsClient {
        &self.fs
    }

    pub fn process(&self) -> &ProcessClient {
        &self.process
    }

    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    pub fn mongo(&self) -> &MongoClient {
        &self.mongo
    }

    pub fn sqlite(&self) -> &SqliteClient {
        &self.sqlite
    }

    /// An untyped requestor for `namespace`, for raw envelopes.
    pub fn requestor(&self, namespace: Namespace) -> BridgeRequestor<HttpClient> {
        make_bridge_requestor(self.http.clone(), namespace)
    }

    /// Downloads a host file, optionally from inside an archive of kind `container`.
    pub async fn fetch_asset(&self, path: &str, container: Option<&str>) -> Result<Bytes> {
        let url = resolve_asset_url(path, container);
        let response = self
            .http
            .request(&url, RequestOptions::get().response_type(ResponseType::Bytes))
            .await?;

        Ok(match response.data {
            Payload::Bytes(bytes) => bytes,
            Payload::Text(text) => Bytes::from(text),
            Payload::Json(value) => Bytes::from(value.to_string()),
        })
    }

    /// Fetches `url` through the host's proxy, as text.
    pub async fn fetch_proxied(&self, url: &str) -> Result<Response> {
        self.http
            .request(url, RequestOptions::get().proxy().response_type(ResponseType::Text))
            .await
    }
}
