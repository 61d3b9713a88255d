//! Request and response types for the executor.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use hostbridge_core::Result;
use hostbridge_core::error::{InvalidInputError, ProtocolError};
use hostbridge_core::urls::StringifyOptions;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How the body of a successful response is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Parsed JSON; an empty body decodes as `null`.
    #[default]
    Json,
    /// UTF-8 text.
    Text,
    /// Raw bytes (blobs, assets).
    Bytes,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Text(String),
    Bytes(Bytes),
    /// URL-encoded form fields.
    Form(Vec<(String, String)>),
}

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    Bytes(Bytes),
}

impl Payload {
    /// Converts the payload into a JSON value; text becomes a JSON string.
    ///
    /// Bytes are interpreted as JSON and yield a protocol error when they are not.
    pub fn into_value(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Text(text) => Ok(Value::String(text)),
            Payload::Bytes(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ProtocolError::Body {
                    message: e.to_string(),
                }
                .into()
            }),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bytes) => Some(bytes),
            Payload::Text(text) => Some(text.as_bytes()),
            Payload::Json(_) => None,
        }
    }
}

/// Options of one request; see [`crate::HttpClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub response_type: ResponseType,
    pub headers: BTreeMap<String, String>,
    /// Query object appended with [`stringify_query`](hostbridge_core::urls::stringify_query).
    pub query: Option<Value>,
    pub query_options: StringifyOptions,
    /// Route the request through the host's same-origin proxy.
    pub proxy: bool,
    pub body: Option<RequestBody>,
    /// Why the last [`RequestOptions::query`] value could not be serialized.
    query_error: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::default().method(Method::Post)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the query object.
    ///
    /// A value that cannot be serialized (e.g. a map with non-string keys)
    /// makes the request fail with an invalid-input error when it is sent.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        match serde_json::to_value(query) {
            Ok(value) => {
                self.query = Some(value);
                self.query_error = None;
            }
            Err(e) => {
                self.query = None;
                self.query_error = Some(e.to_string());
            }
        }
        self
    }

    pub fn query_options(mut self, options: StringifyOptions) -> Self {
        self.query_options = options;
        self
    }

    pub fn proxy(mut self) -> Self {
        self.proxy = true;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Fails if the options cannot produce a request.
    pub(crate) fn validate(&self) -> Result<()> {
        match &self.query_error {
            Some(reason) => Err(InvalidInputError::Params {
                action: "query".to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// A successful response: decoded body, headers and status.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T = Payload> {
    pub data: T,
    pub headers: BTreeMap<String, String>,
    pub status: u16,
}

impl Response<Payload> {
    /// Decodes the payload as `T`, keeping headers and status.
    pub fn json<T: DeserializeOwned>(self) -> Result<Response<T>> {
        let value = self.data.into_value()?;
        let data = serde_json::from_value(value).map_err(|e| ProtocolError::Body {
            message: e.to_string(),
        })?;

        Ok(Response {
            data,
            headers: self.headers,
            status: self.status,
        })
    }
}
