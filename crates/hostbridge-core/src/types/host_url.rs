//! Host URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated origin of the host process serving the bridge endpoints.
///
/// Bridge paths are same-origin relative paths (`/api/bridges/fs`); a
/// `HostUrl` turns them into absolute request URLs. Absolute URLs are left
/// alone so callers can still reach other origins directly.
///
/// # Example
///
/// ```
/// use hostbridge_core::HostUrl;
///
/// let host = HostUrl::new("http://127.0.0.1:3000").unwrap();
/// assert_eq!(host.join("/api/bridges/fs"), "http://127.0.0.1:3000/api/bridges/fs");
/// assert_eq!(host.join("https://example.com/x"), "https://example.com/x");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostUrl(Url);

impl HostUrl {
    /// Create a new host URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute `http`/`https` URL with a host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::HostUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Resolves a request URL against this host.
    ///
    /// Absolute `http`/`https` URLs with a host are returned unchanged;
    /// anything else, including paths such as `status:1`, is appended to the
    /// origin with exactly one `/` in between.
    pub fn join(&self, url: &str) -> String {
        if is_absolute_http(url) {
            return url.to_string();
        }

        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, url.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the port, falling back to the scheme default.
    pub fn port(&self) -> Option<u16> {
        self.0.port_or_known_default()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::HostUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidInputError::HostUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::HostUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

fn is_absolute_http(url: &str) -> bool {
    Url::parse(url)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

impl fmt::Display for HostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HostUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for HostUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for HostUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        HostUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for HostUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
