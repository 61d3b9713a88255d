//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::call::CallArgs;
use crate::commands::config::ConfigCommand;
use crate::commands::fs::FsCommand;
use crate::commands::host::HostCommand;
use crate::commands::mongo::MongoCommand;
use crate::commands::process::ProcessCommand;
use crate::commands::sqlite::SqliteCommand;
use crate::commands::store::StoreCommand;
use crate::commands::urls::{AssetUrlArgs, ProxyUrlArgs};

/// Call host capabilities through their bridge endpoints.
#[derive(Parser, Debug)]
#[command(name = "bridge")]
#[command(author, version = env!("BRIDGE_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Host base URL (overrides the saved profile)
    #[arg(long, global = true, env = "HOSTBRIDGE_URL")]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Application configuration
    Config(ConfigCommand),

    /// Host filesystem
    Fs(FsCommand),

    /// Open paths and run commands on the host
    Process(ProcessCommand),

    /// Persistent key-value store
    Store(StoreCommand),

    /// Document database
    Mongo(MongoCommand),

    /// SQLite database
    Sqlite(SqliteCommand),

    /// Send a raw {action, data} envelope to a namespace
    Call(CallArgs),

    /// Print the fetchable URL of a host file
    AssetUrl(AssetUrlArgs),

    /// Print the proxied form of an external URL
    ProxyUrl(ProxyUrlArgs),

    /// Manage the saved host profile
    Host(HostCommand),
}
