//! Timestamps attached to documents by the write-path.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Formats `date` as an ISO-8601 UTC string with millisecond precision,
/// e.g. `2024-05-01T12:30:00.000Z`.
pub fn format_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns the current time in the format of [`format_timestamp`].
pub fn timestamp() -> String {
    format_timestamp(Utc::now())
}

/// Creation and last-modified time of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps<T = String> {
    pub ct: T,
    pub mt: T,
}

impl Timestamps {
    /// Both times set to now.
    pub fn now() -> Self {
        let ct = timestamp();
        Self { mt: ct.clone(), ct }
    }
}

/// A point in time, serialized as RFC 3339.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Safe for file names: `2024-5-1-12h30m0s`.
    pub const FILE_FORMAT: &'static str = "%-Y-%-m-%-d-%-Hh%-Mm%-Ss";

    pub const DISPLAY_FORMAT: &'static str = "%d/%m/%Y %H:%M:%S";

    pub const DISPLAY_DATE_ONLY_FORMAT: &'static str = "%d/%m/%Y";

    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(date: DateTime<Utc>) -> Self {
        Self(date)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Formats in local time with a `strftime` pattern.
    pub fn format(&self, fmt: &str) -> String {
        self.0.with_timezone(&Local).format(fmt).to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(self.0))
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| {
                InvalidInputError::Other {
                    message: format!("invalid timestamp '{value}': {e}"),
                }
                .into()
            })
    }
}
