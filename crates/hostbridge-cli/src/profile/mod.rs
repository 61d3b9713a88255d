//! Saved host profile and host URL resolution.

pub mod storage;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hostbridge_core::HostUrl;
use hostbridge_http::Bridge;

/// Host used when neither a flag, the environment nor a profile names one.
pub const DEFAULT_HOST: &str = "http://127.0.0.1:3000";

/// Persisted CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub host: String,
}

/// Where the host URL in effect came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    /// `--host` or `HOSTBRIDGE_URL`.
    Flag,
    Profile,
    Default,
}

impl HostSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostSource::Flag => "flag or HOSTBRIDGE_URL",
            HostSource::Profile => "profile",
            HostSource::Default => "default",
        }
    }
}

/// Picks the host URL: flag or environment first, then the profile, then
/// [`DEFAULT_HOST`].
pub fn select_host(flag: Option<&str>, profile: Option<Profile>) -> Result<(HostUrl, HostSource)> {
    let (raw, source) = match (flag, profile) {
        (Some(flag), _) => (flag.to_string(), HostSource::Flag),
        (None, Some(profile)) => (profile.host, HostSource::Profile),
        (None, None) => (DEFAULT_HOST.to_string(), HostSource::Default),
    };

    let host = HostUrl::new(&raw).with_context(|| format!("Invalid host URL from {}", source.as_str()))?;
    Ok((host, source))
}

/// Resolves the host URL against the saved profile.
pub fn resolve_host(flag: Option<&str>) -> Result<(HostUrl, HostSource)> {
    let profile = if flag.is_some() {
        None
    } else {
        storage::load_profile().context("Failed to load profile")?
    };

    select_host(flag, profile)
}

/// Builds a bridge to the resolved host.
pub fn connect(flag: Option<&str>) -> Result<Bridge> {
    let (host, source) = resolve_host(flag)?;
    tracing::debug!(%host, source = source.as_str(), "using host");

    Bridge::new(host).context("Failed to create HTTP client")
}
