//! Request executor.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, instrument};

use hostbridge_core::error::{InvalidInputError, ProtocolError};
use hostbridge_core::urls::{resolve_proxy_url, stringify_query};
use hostbridge_core::{Error, ErrorBody, HostUrl, Result, Transport};

use crate::error::transport_error;
use crate::request::{Payload, RequestBody, RequestOptions, Response, ResponseType};

/// Executes HTTP requests against a bridge host.
///
/// Cloning is cheap; clones share one connection pool. The client never
/// retries and imposes no timeout unless one is configured on the builder.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    host: HostUrl,
}

impl HttpClient {
    /// Create a client for `host` with default settings.
    pub fn new(host: HostUrl) -> Result<Self> {
        Self::builder(host).build()
    }

    pub fn builder(host: HostUrl) -> HttpClientBuilder {
        HttpClientBuilder::new(host)
    }

    /// Returns the host this client resolves relative URLs against.
    pub fn host(&self) -> &HostUrl {
        &self.host
    }

    /// Performs one request.
    ///
    /// With `proxy` set, `url` is rewritten through the host's proxy before the
    /// query string is appended. Relative URLs are resolved against the host.
    /// Any failure (transport error or non-2xx) becomes a single error whose
    /// message is the host's `message` field, or the transport's own text
    /// when the body has none. Every request and outcome is logged.
    #[instrument(skip(self, options), fields(host = %self.host, method = %options.method))]
    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<Response> {
        if let Err(err) = options.validate() {
            error!(
                message = %err.message(),
                method = %options.method,
                %url,
                query = ?options.query,
                "http client error"
            );
            return Err(err);
        }

        let mut url = if options.proxy {
            resolve_proxy_url(url)
        } else {
            url.to_string()
        };
        if let Some(query) = &options.query {
            url.push_str(&stringify_query(query, options.query_options));
        }
        let url = self.host.join(&url);

        debug!(
            method = %options.method,
            %url,
            response_type = ?options.response_type,
            headers = ?options.headers,
            body = ?options.body,
            "http client request"
        );

        match self.execute(&url, &options).await {
            Ok(response) => {
                debug!(
                    method = %options.method,
                    %url,
                    body = ?options.body,
                    response_type = ?options.response_type,
                    request_headers = ?options.headers,
                    status = response.status,
                    headers = ?response.headers,
                    data = ?response.data,
                    "http client response"
                );
                Ok(response)
            }
            Err(err) => {
                error!(
                    message = %err.message(),
                    error = ?err,
                    method = %options.method,
                    %url,
                    headers = ?options.headers,
                    response_type = ?options.response_type,
                    body = ?options.body,
                    "http client error"
                );
                Err(err)
            }
        }
    }

    async fn execute(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        let mut builder = self.client.request(options.method.into(), url);

        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &options.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Text(text)) => builder.body(text.clone()),
            Some(RequestBody::Bytes(bytes)) => builder.body(bytes.clone()),
            Some(RequestBody::Form(fields)) => builder.form(fields),
            None => builder,
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let headers = collect_headers(response.headers());

        if !status.is_success() {
            return Err(self.parse_error_response(response).await);
        }

        let data = match options.response_type {
            ResponseType::Json => {
                let bytes = response.bytes().await.map_err(transport_error)?;
                if bytes.is_empty() {
                    Payload::Json(Value::Null)
                } else {
                    let value = serde_json::from_slice(&bytes).map_err(|e| ProtocolError::Body {
                        message: e.to_string(),
                    })?;
                    Payload::Json(value)
                }
            }
            ResponseType::Text => Payload::Text(response.text().await.map_err(transport_error)?),
            ResponseType::Bytes => {
                Payload::Bytes(response.bytes().await.map_err(transport_error)?)
            }
        };

        Ok(Response {
            data,
            headers,
            status: status.as_u16(),
        })
    }

    /// Turns a non-2xx response into a host or transport error.
    async fn parse_error_response(&self, response: reqwest::Response) -> Error {
        let fallback = match response.error_for_status_ref() {
            Err(err) => transport_error(err).message(),
            Ok(_) => format!("request failed with status code {}", response.status().as_u16()),
        };

        match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                message: Some(message),
            }) => Error::host(message),
            _ => Error::transport(fallback),
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let response = self
            .request(path, RequestOptions::post().json(body.clone()))
            .await?;

        response.data.into_value()
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    out
}

/// Builder for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    host: HostUrl,
    user_agent: String,
    timeout: Option<Duration>,
    headers: BTreeMap<String, String>,
}

impl HttpClientBuilder {
    fn new(host: HostUrl) -> Self {
        Self {
            host,
            user_agent: concat!("hostbridge/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Total time allowed per request. Unset means no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// A header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut headers = HeaderMap::new();

        for (name, value) in &self.headers {
            let invalid = |reason: String| InvalidInputError::Header {
                name: name.clone(),
                reason,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .default_headers(headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(transport_error)?;

        Ok(HttpClient {
            client,
            host: self.host,
        })
    }
}
