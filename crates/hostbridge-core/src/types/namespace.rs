//! Bridge namespace type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Path prefix shared by every bridge endpoint.
pub const BRIDGE_PREFIX: &str = "/api/bridges";

/// A capability group addressed by a fixed path segment under [`BRIDGE_PREFIX`].
///
/// # Example
///
/// ```
/// use hostbridge_core::Namespace;
///
/// assert_eq!(Namespace::Mongo.as_str(), "db/mongo");
/// assert_eq!(Namespace::Mongo.endpoint(), "/api/bridges/db/mongo");
/// assert_eq!("db/sqlite".parse::<Namespace>().unwrap(), Namespace::Sqlite);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Namespace {
    Config,
    Fs,
    Process,
    Store,
    Mongo,
    Sqlite,
}

impl Namespace {
    /// Every namespace, in endpoint table order.
    pub const ALL: [Namespace; 6] = [
        Namespace::Config,
        Namespace::Fs,
        Namespace::Process,
        Namespace::Store,
        Namespace::Mongo,
        Namespace::Sqlite,
    ];

    /// Returns the path segment for this namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Config => "config",
            Namespace::Fs => "fs",
            Namespace::Process => "process",
            Namespace::Store => "store",
            Namespace::Mongo => "db/mongo",
            Namespace::Sqlite => "db/sqlite",
        }
    }

    /// Returns the same-origin endpoint path, e.g. `/api/bridges/fs`.
    pub fn endpoint(&self) -> String {
        format!("{}/{}", BRIDGE_PREFIX, self.as_str())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Namespace {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

impl TryFrom<String> for Namespace {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Namespace> for String {
    fn from(ns: Namespace) -> Self {
        ns.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let endpoints: Vec<String> = Namespace::ALL.iter().map(|ns| ns.endpoint()).collect();
        assert_eq!(
            endpoints,
            vec![
                "/api/bridges/config",
                "/api/bridges/fs",
                "/api/bridges/process",
                "/api/bridges/store",
                "/api/bridges/db/mongo",
                "/api/bridges/db/sqlite",
            ]
        );
    }

    #[test]
    fn parse_round_trip() {
        for ns in Namespace::ALL {
            assert_eq!(ns.as_str().parse::<Namespace>().unwrap(), ns);
        }
    }

    #[test]
    fn parse_unknown() {
        assert!("mongo".parse::<Namespace>().is_err());
        assert!("db".parse::<Namespace>().is_err());
    }
}
