//! `bridge store` commands.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use super::parse_json;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct StoreCommand {
    #[command(subcommand)]
    pub command: StoreSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum StoreSubcommand {
    /// Print the value under a key
    Get { key: String },

    /// Store a JSON value under a key
    Set {
        key: String,
        /// JSON value, e.g. '"dark"' or '{"size": 14}'
        value: String,
    },

    /// Remove a key and print its previous value
    Remove { key: String },

    /// Print every key and value
    Entries,

    /// List every key
    Keys,
}

pub async fn handle(cmd: StoreCommand, host: Option<&str>) -> Result<()> {
    let bridge = profile::connect(host)?;
    let store = bridge.store();

    match cmd.command {
        StoreSubcommand::Get { key } => {
            let value: Option<Value> = store.get(&key).await.context("Failed to get key")?;
            print_value(&key, value)?;
        }
        StoreSubcommand::Set { key, value } => {
            let value = parse_json(&value, "store value")?;
            store
                .set(&key, &value)
                .await
                .context("Failed to set key")?;
            output::success(&format!("Stored {}", key));
        }
        StoreSubcommand::Remove { key } => {
            let previous: Option<Value> =
                store.remove(&key).await.context("Failed to remove key")?;
            print_value(&key, previous)?;
        }
        StoreSubcommand::Entries => {
            let entries: BTreeMap<String, Value> =
                store.entries().await.context("Failed to list entries")?;
            output::json(&entries)?;
        }
        StoreSubcommand::Keys => {
            let keys = store.keys().await.context("Failed to list keys")?;
            output::names(&keys, "Store is empty.");
        }
    }

    Ok(())
}

fn print_value(key: &str, value: Option<Value>) -> Result<()> {
    match value {
        Some(value) => output::json(&value),
        None => {
            output::note(&format!("No value under '{}'.", key));
            Ok(())
        }
    }
}
