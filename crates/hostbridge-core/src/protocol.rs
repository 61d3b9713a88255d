//! Wire protocol shared by bridge clients and hosts.
//!
//! Request: `POST /api/bridges/<namespace>` with body `{action, data}`.
//! Success: 2xx with body `{data: <result>}`. Failure: non-2xx, body
//! `{message: <text>}` when the host can say why.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{InvalidInputError, ProtocolError};
use crate::{Namespace, Result};

/// Key under which a successful host answer carries its result.
pub const DATA_KEY: &str = "data";

/// The `{action, data}` envelope posted to a namespace endpoint.
///
/// The namespace is not part of the envelope; it is encoded in the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub action: String,
    pub data: Value,
}

impl BridgeRequest {
    /// Create an envelope from an action name and serializable parameters.
    pub fn new(action: impl Into<String>, data: impl Serialize) -> Result<Self> {
        let action = action.into();
        let data = serde_json::to_value(data).map_err(|e| InvalidInputError::Params {
            action: action.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self { action, data })
    }

    /// Create an envelope for an action that takes no parameters (`data: {}`).
    pub fn empty(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            data: Value::Object(Map::new()),
        }
    }
}

/// A successful host answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse<T> {
    pub data: T,
}

impl<T> BridgeResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body of a failed host answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Extracts the `data` field of a successful answer.
///
/// An answer without the field is a protocol error, never a silent
/// pass-through of the whole body. `data: null` is a valid result.
pub fn unwrap_data(body: Value, namespace: Namespace, action: &str) -> Result<Value> {
    match body {
        Value::Object(mut map) if map.contains_key(DATA_KEY) => {
            Ok(map.remove(DATA_KEY).unwrap_or(Value::Null))
        }
        _ => Err(ProtocolError::MissingData {
            namespace: namespace.to_string(),
            action: action.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn empty_envelope_has_object_data() {
        let req = BridgeRequest::empty("get");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"action": "get", "data": {}})
        );
    }

    #[test]
    fn envelope_from_params() {
        let req = BridgeRequest::new("stats", json!({"path": "/tmp"})).unwrap();
        assert_eq!(req.action, "stats");
        assert_eq!(req.data, json!({"path": "/tmp"}));
    }

    #[test]
    fn unwrap_data_field() {
        let data = unwrap_data(json!({"data": [1, 2]}), Namespace::Fs, "read-dir").unwrap();
        assert_eq!(data, json!([1, 2]));
    }

    #[test]
    fn unwrap_null_data() {
        let data = unwrap_data(json!({"data": null}), Namespace::Fs, "remove").unwrap();
        assert_eq!(data, Value::Null);
    }

    #[test]
    fn missing_data_is_protocol_error() {
        let err = unwrap_data(json!({"size": 1}), Namespace::Fs, "stats").unwrap_err();
        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::MissingData { .. })
        ));

        let err = unwrap_data(json!([1]), Namespace::Store, "keys").unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn error_body_message_is_optional() {
        let body: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body.message, None);

        let body: ErrorBody = serde_json::from_value(json!({"message": "boom"})).unwrap();
        assert_eq!(body.message.as_deref(), Some("boom"));
    }
}
