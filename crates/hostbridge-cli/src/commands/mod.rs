//! Subcommand implementations, one module per namespace.

pub mod call;
pub mod config;
pub mod fs;
pub mod host;
pub mod mongo;
pub mod process;
pub mod sqlite;
pub mod store;
pub mod urls;

use anyhow::{Context, Result};
use serde_json::Value;

/// Parses a JSON command-line argument.
pub(crate) fn parse_json(raw: &str, what: &str) -> Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{} must be valid JSON", what))
}
