//! Capability client tests against a mock host.

use hostbridge_core::capability::db::CreateUniqueIndexParams;
use hostbridge_core::capability::db::mongo::{QueryItemsParams, WithId};
use hostbridge_core::capability::process::Options;
use hostbridge_core::{Error, HostUrl};
use hostbridge_http::Bridge;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bridge(server: &MockServer) -> Bridge {
    Bridge::new(HostUrl::new(server.uri()).unwrap()).unwrap()
}

/// Mounts one `{action, data}` exchange on `endpoint`.
async fn mount_action(server: &MockServer, endpoint: &str, request: Value, data: Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .and(body_json(request))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
        .expect(1)
        .mount(server)
        .await;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Book {
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mt: Option<String>,
}

impl Book {
    fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ct: None,
            mt: None,
        }
    }
}

// ============================================================================
// config
// ============================================================================

#[tokio::test]
async fn test_config_get() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/config",
        json!({"action": "get", "data": {}}),
        json!({
            "port": 3000,
            "db": {
                "mongo": {"name": "lib", "url": "mongodb://localhost:27017"},
                "sqlite": {"path": "/data/lib.db"}
            },
            "theme": {"fontSize": "14px"},
            "vars": {"default": {"root": "/books"}}
        }),
    )
    .await;

    let config = bridge(&server).config().get().await.unwrap();
    assert_eq!(config.port, 3000);
    assert_eq!(config.theme.font_size, "14px");
    assert_eq!(config.var("default", "root"), Some("/books"));
}

// ============================================================================
// fs
// ============================================================================

#[tokio::test]
async fn test_fs_read_dir() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/fs",
        json!({"action": "read-dir", "data": {"path": "/tmp"}}),
        json!(["a.txt", "b"]),
    )
    .await;

    let names = bridge(&server).fs().read_dir("/tmp").await.unwrap();
    assert_eq!(names, vec!["a.txt", "b"]);
}

#[tokio::test]
async fn test_fs_stats() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/fs",
        json!({"action": "stats", "data": {"path": "/tmp/a.txt"}}),
        json!({"size": 12, "isDir": false, "isFile": true, "modifiedTime": 1700000000000u64}),
    )
    .await;

    let stats = bridge(&server).fs().stats("/tmp/a.txt").await.unwrap();
    assert!(stats.is_file);
    assert_eq!(stats.size, 12);
}

#[tokio::test]
async fn test_fs_write_text_file() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/fs",
        json!({"action": "write-text-file", "data": {"path": "/tmp/n.md", "data": "# notes"}}),
        Value::Null,
    )
    .await;

    bridge(&server)
        .fs()
        .write_text_file("/tmp/n.md", "# notes")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_fs_host_error_is_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bridges/fs"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let err = bridge(&server).fs().stats("/missing").await.unwrap_err();
    assert_eq!(err.to_string(), "not found");
}

#[tokio::test]
async fn test_fs_shape_mismatch() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/fs",
        json!({"action": "read-dir", "data": {"path": "/tmp"}}),
        json!({"unexpected": true}),
    )
    .await;

    let err = bridge(&server).fs().read_dir("/tmp").await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
}

// ============================================================================
// process
// ============================================================================

#[tokio::test]
async fn test_process_output() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/process",
        json!({
            "action": "output",
            "data": {"cmd": "git", "args": ["status"], "options": {"cwd": "/repo"}}
        }),
        json!({"stdout": "clean\n", "stderr": "", "status": 0}),
    )
    .await;

    let output = bridge(&server)
        .process()
        .output("git", &["status"], &Options::cwd("/repo"))
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.stdout, "clean\n");
}

// ============================================================================
// store
// ============================================================================

#[tokio::test]
async fn test_store_set_then_get() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/store",
        json!({"action": "set", "data": {"key": "theme", "value": "dark"}}),
        Value::Null,
    )
    .await;
    mount_action(
        &server,
        "/api/bridges/store",
        json!({"action": "get", "data": {"key": "theme"}}),
        json!("dark"),
    )
    .await;

    let bridge = bridge(&server);
    bridge.store().set("theme", &"dark").await.unwrap();
    let theme: Option<String> = bridge.store().get("theme").await.unwrap();
    assert_eq!(theme.as_deref(), Some("dark"));
}

// ============================================================================
// db/sqlite
// ============================================================================

#[tokio::test]
async fn test_sqlite_execute() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/db/sqlite",
        json!({"action": "execute", "data": {"sql": "INSERT INTO t(a) VALUES (1)"}}),
        json!({"rowsAffected": 1, "lastInsertRow": 42}),
    )
    .await;

    let result = bridge(&server)
        .sqlite()
        .execute("INSERT INTO t(a) VALUES (1)")
        .await
        .unwrap();

    assert_eq!(result.rows_affected, 1);
    assert_eq!(result.last_insert_row, 42);
}

#[tokio::test]
async fn test_sqlite_create_unique_indexes() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/db/sqlite",
        json!({
            "action": "create-unique-indexes",
            "data": {"params": [{"collection": "books", "fields": ["isbn"]}]}
        }),
        json!(["books_isbn"]),
    )
    .await;

    let names = bridge(&server)
        .sqlite()
        .create_unique_indexes(&[CreateUniqueIndexParams::new("books", ["isbn"])])
        .await
        .unwrap();

    assert_eq!(names, vec!["books_isbn"]);
}

// ============================================================================
// db/mongo
// ============================================================================

#[tokio::test]
async fn test_mongo_find() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/db/mongo",
        json!({
            "action": "find",
            "data": {"params": {
                "collection": "books",
                "pagination": {"page": 2, "limit": 10},
                "filters": {"title": "Dune"}
            }}
        }),
        json!([{"_id": "b1", "title": "Dune"}]),
    )
    .await;

    let params = QueryItemsParams::new("books")
        .paginate(2, 10)
        .filter("title", "Dune");
    let books: Vec<WithId<Book>> = bridge(&server).mongo().find(&params).await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "b1");
    assert_eq!(books[0].title, "Dune");
}

#[tokio::test]
async fn test_mongo_collection_add_stamps_both_times() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bridges/db/mongo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "b1", "title": "Dune"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bridge = bridge(&server);
    let added = bridge
        .mongo()
        .collection::<Book>("books")
        .add(&[Book::titled("Dune")])
        .await
        .unwrap();
    assert_eq!(added[0].id, "b1");

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["action"], "add");

    let doc = &body["data"]["params"]["data"][0];
    assert_eq!(body["data"]["params"]["collection"], "books");
    assert_eq!(doc["title"], "Dune");
    assert!(doc["ct"].is_string());
    assert_eq!(doc["ct"], doc["mt"]);
}

#[tokio::test]
async fn test_mongo_collection_update_overwrites_mt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bridges/db/mongo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let stale = Book {
        title: "Dune".to_string(),
        ct: Some("2020-01-01T00:00:00.000Z".to_string()),
        mt: Some("2020-01-01T00:00:00.000Z".to_string()),
    };

    bridge(&server)
        .mongo()
        .collection::<Book>("books")
        .update(&[WithId::new("b1", stale)])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    let doc = &body["data"]["params"]["data"][0];

    assert_eq!(body["action"], "update");
    assert_eq!(doc["_id"], "b1");
    assert_eq!(doc["ct"], "2020-01-01T00:00:00.000Z");
    assert_ne!(doc["mt"], "2020-01-01T00:00:00.000Z");
}

#[tokio::test]
async fn test_mongo_stats() {
    let server = MockServer::start().await;
    mount_action(
        &server,
        "/api/bridges/db/mongo",
        json!({"action": "stats", "data": {}}),
        json!([{"name": "books", "count": 3}]),
    )
    .await;

    let stats = bridge(&server).mongo().stats().await.unwrap();
    assert_eq!(stats[0].name, "books");
    assert_eq!(stats[0].count, 3);
}

// ============================================================================
// Assets and proxy
// ============================================================================

#[tokio::test]
async fn test_fetch_asset_from_archive() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bridges/asset/books/a.cbz%3E001.jpg"))
        .and(query_param("container", "zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xffu8, 0xd8]))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = bridge(&server)
        .fetch_asset("books/a.cbz>001.jpg", Some("zip"))
        .await
        .unwrap();

    assert_eq!(&bytes[..], &[0xff, 0xd8]);
}

#[tokio::test]
async fn test_fetch_asset_without_container() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bridges/asset/photos/a.png"))
        .and(query_param("container", ""))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = bridge(&server).fetch_asset("photos/a.png", None).await.unwrap();
    assert_eq!(&bytes[..], b"png");
}

#[tokio::test]
async fn test_fetch_proxied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/bridges/proxy/https://example.com/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<rss/>"))
        .expect(1)
        .mount(&server)
        .await;

    let response = bridge(&server)
        .fetch_proxied("https://example.com/feed")
        .await
        .unwrap();

    assert_eq!(response.data.as_text(), Some("<rss/>"));
}
