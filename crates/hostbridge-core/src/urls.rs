//! URL resolution for bridge requests.
//!
//! Pure functions that turn logical paths and query objects into request
//! URLs: the same-origin proxy rewrite, host asset URLs, and query-string
//! encoding. Nothing here performs I/O or fails.

use serde::Serialize;
use serde_json::{Map, Value, json};
use url::form_urlencoded;

use crate::types::BRIDGE_PREFIX;

/// Options controlling [`stringify_query`].
///
/// The default never percent-encodes, repeats the key for array values, keeps
/// `null` values as `key=` and starts the result with `?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringifyOptions {
    /// Start with `&` instead of `?`, for appending to a URL that already has a query.
    pub append: bool,
    /// Percent-encode keys and values.
    pub encode: bool,
    /// Drop `null` values instead of emitting `key=`.
    pub skip_nulls: bool,
}

impl StringifyOptions {
    /// Options for continuing an existing query string.
    pub fn append() -> Self {
        Self {
            append: true,
            ..Self::default()
        }
    }
}

/// Serializes a query object to a `?`-prefixed (or `&`-prefixed) string.
///
/// Only object-shaped values produce pairs. Arrays repeat the key
/// (`a=1&a=2`), nested objects use brackets (`a[b]=c`), empty arrays and
/// objects emit nothing. The prefix is always present, so an empty query
/// yields a lone `?` or `&`.
///
/// ```
/// use hostbridge_core::urls::{StringifyOptions, stringify_query};
/// use serde_json::json;
///
/// assert_eq!(stringify_query(&json!({"a": [1, 2], "b": "x"}), StringifyOptions::default()), "?a=1&a=2&b=x");
/// assert_eq!(stringify_query(&json!({}), StringifyOptions::append()), "&");
/// ```
pub fn stringify_query<Q: Serialize + ?Sized>(query: &Q, options: StringifyOptions) -> String {
    let prefix = if options.append { '&' } else { '?' };
    let mut pairs = Vec::new();

    if let Ok(Value::Object(map)) = serde_json::to_value(query) {
        for (key, value) in &map {
            push_pairs(key, value, options, &mut pairs);
        }
    }

    let mut out = String::with_capacity(1 + pairs.iter().map(|p| p.len() + 1).sum::<usize>());
    out.push(prefix);
    out.push_str(&pairs.join("&"));
    out
}

fn push_pairs(key: &str, value: &Value, options: StringifyOptions, pairs: &mut Vec<String>) {
    match value {
        Value::Null if options.skip_nulls => {}
        Value::Null => pairs.push(pair(key, "", options)),
        Value::Bool(b) => pairs.push(pair(key, &b.to_string(), options)),
        Value::Number(n) => pairs.push(pair(key, &n.to_string(), options)),
        Value::String(s) => pairs.push(pair(key, s, options)),
        Value::Array(items) => {
            for item in items {
                push_pairs(key, item, options, pairs);
            }
        }
        Value::Object(map) => {
            for (child, value) in map {
                push_pairs(&format!("{key}[{child}]"), value, options, pairs);
            }
        }
    }
}

fn pair(key: &str, value: &str, options: StringifyOptions) -> String {
    if options.encode {
        format!("{}={}", encode(key), encode(value))
    } else {
        format!("{key}={value}")
    }
}

fn encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Parses a query string built with default [`StringifyOptions`] back into
/// an object.
///
/// A single leading `?` or `&` is ignored. Pairs are split on `&` and `=`
/// and nothing is decoded, so `+` and `%` come back as written. Every value
/// decodes as a string; a key seen more than once becomes an array in order
/// of appearance. Bracketed keys are kept verbatim (`a[b]` stays one key).
///
/// Without encoding a value containing `&` or `=` cannot be told apart from
/// a separator; such values need `encode` on both sides.
pub fn parse_query(query: &str) -> Map<String, Value> {
    parse_query_with(query, StringifyOptions::default())
}

/// Parses a query string built with `options`.
///
/// With `encode` set, keys and values are form-decoded (`+` is a space,
/// `%XX` a byte); otherwise they are taken verbatim.
pub fn parse_query_with(query: &str, options: StringifyOptions) -> Map<String, Value> {
    let query = query
        .strip_prefix('?')
        .or_else(|| query.strip_prefix('&'))
        .unwrap_or(query);

    let mut map = Map::new();

    if options.encode {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            insert_pair(&mut map, key.into_owned(), value.into_owned());
        }
    } else {
        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            insert_pair(&mut map, key.to_string(), value.to_string());
        }
    }

    map
}

fn insert_pair(map: &mut Map<String, Value>, key: String, value: String) {
    let value = Value::String(value);

    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

/// Routes a URL through the host's same-origin proxy.
///
/// The original URL is kept verbatim as the trailing path, query included.
pub fn resolve_proxy_url(url: &str) -> String {
    format!("{BRIDGE_PREFIX}/proxy/{url}")
}

/// Maps a host filesystem path to a fetchable asset URL.
///
/// `container` names the archive kind when `path` points inside one (see
/// [`crate::capability::fs::container_entry_path`]). It is always encoded;
/// a missing container becomes `container=`.
pub fn resolve_asset_url(path: &str, container: Option<&str>) -> String {
    format!("{BRIDGE_PREFIX}/asset/{path}")
        + &stringify_query(&json!({ "container": container }), StringifyOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_query_keeps_prefix() {
        assert_eq!(stringify_query(&json!({}), StringifyOptions::default()), "?");
        assert_eq!(stringify_query(&json!({}), StringifyOptions::append()), "&");
    }

    #[test]
    fn append_never_starts_with_question_mark() {
        for query in [json!({}), json!({"a": 1}), json!({"a": [1, 2], "b": null})] {
            let s = stringify_query(&query, StringifyOptions::append());
            assert!(s.starts_with('&'), "{s}");
            assert!(!s.contains('?'), "{s}");
        }
    }

    #[test]
    fn arrays_repeat_key() {
        let s = stringify_query(&json!({"tag": ["a", "b", "c"]}), StringifyOptions::default());
        assert_eq!(s, "?tag=a&tag=b&tag=c");
    }

    #[test]
    fn nested_objects_use_brackets() {
        let s = stringify_query(
            &json!({"pagination": {"limit": 10, "page": 2}}),
            StringifyOptions::default(),
        );
        assert_eq!(s, "?pagination[limit]=10&pagination[page]=2");
    }

    #[test]
    fn values_are_not_encoded_by_default() {
        let s = stringify_query(&json!({"path": "a b/c"}), StringifyOptions::default());
        assert_eq!(s, "?path=a b/c");
    }

    #[test]
    fn encode_option_percent_encodes() {
        let options = StringifyOptions {
            encode: true,
            ..StringifyOptions::default()
        };
        let s = stringify_query(&json!({"path": "a&b/c"}), options);
        assert_eq!(s, "?path=a%26b%2Fc");
    }

    #[test]
    fn nulls_kept_unless_skipped() {
        let query = json!({"a": null, "b": 1});
        assert_eq!(stringify_query(&query, StringifyOptions::default()), "?a=&b=1");

        let options = StringifyOptions {
            skip_nulls: true,
            ..StringifyOptions::default()
        };
        assert_eq!(stringify_query(&query, options), "?b=1");
    }

    #[test]
    fn empty_collections_emit_nothing() {
        let s = stringify_query(&json!({"a": [], "b": {}, "c": true}), StringifyOptions::default());
        assert_eq!(s, "?c=true");
    }

    #[test]
    fn non_object_query_is_empty() {
        assert_eq!(stringify_query(&json!([1, 2]), StringifyOptions::default()), "?");
        assert_eq!(stringify_query("text", StringifyOptions::default()), "?");
    }

    #[test]
    fn skipped_struct_fields_are_omitted() {
        #[derive(Serialize)]
        struct Query<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            cursor: Option<&'a str>,
            limit: u32,
        }

        let s = stringify_query(&Query { cursor: None, limit: 5 }, StringifyOptions::default());
        assert_eq!(s, "?limit=5");
    }

    #[test]
    fn query_round_trip() {
        let query = json!({"name": "alice", "page": 3, "ids": ["1", "2", "3"]});
        let parsed = parse_query(&stringify_query(&query, StringifyOptions::default()));

        assert_eq!(parsed["name"], json!("alice"));
        assert_eq!(parsed["page"], json!("3"));
        assert_eq!(parsed["ids"], json!(["1", "2", "3"]));
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn query_round_trip_with_encoding() {
        let options = StringifyOptions {
            encode: true,
            ..StringifyOptions::default()
        };
        let query = json!({"q": "a&b=c d", "expr": "1+1"});
        let parsed = parse_query_with(&stringify_query(&query, options), options);
        assert_eq!(parsed["q"], json!("a&b=c d"));
        assert_eq!(parsed["expr"], json!("1+1"));
    }

    #[test]
    fn unencoded_round_trip_keeps_plus_and_percent() {
        let query = json!({"expr": "1+1", "pct": "50%25", "path": "a b/c"});
        let s = stringify_query(&query, StringifyOptions::default());
        assert_eq!(s, "?expr=1+1&path=a b/c&pct=50%25");

        let parsed = parse_query(&s);
        assert_eq!(parsed["expr"], json!("1+1"));
        assert_eq!(parsed["pct"], json!("50%25"));
        assert_eq!(parsed["path"], json!("a b/c"));
    }

    #[test]
    fn parse_keeps_empty_values() {
        let parsed = parse_query("?container=&flag");
        assert_eq!(parsed["container"], json!(""));
        assert_eq!(parsed["flag"], json!(""));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn parse_strips_append_prefix() {
        let parsed = parse_query("&a=1&a=2");
        assert_eq!(parsed["a"], json!(["1", "2"]));
    }

    #[test]
    fn proxy_rewrite() {
        assert_eq!(
            resolve_proxy_url("https://example.com/x"),
            "/api/bridges/proxy/https://example.com/x"
        );
        assert_eq!(
            resolve_proxy_url("https://example.com/x?y=1"),
            "/api/bridges/proxy/https://example.com/x?y=1"
        );
    }

    #[test]
    fn asset_url_without_container() {
        assert_eq!(
            resolve_asset_url("photos/a.png", None),
            "/api/bridges/asset/photos/a.png?container="
        );
    }

    #[test]
    fn asset_url_with_container() {
        assert_eq!(
            resolve_asset_url("books/a.cbz>001.jpg", Some("cbz")),
            "/api/bridges/asset/books/a.cbz>001.jpg?container=cbz"
        );
    }
}
