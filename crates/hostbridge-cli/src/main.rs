//! bridge - CLI tool for calling a hostbridge host.
//!
//! A thin wrapper over `hostbridge-http`, intended for poking at a running
//! host by hand: one subcommand per namespace, one per action below it.

mod cli;
mod commands;
mod output;
mod profile;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{call, config, fs, host, mongo, process, sqlite, store, urls};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let flag = cli.host.as_deref();
    match cli.command {
        Commands::Config(cmd) => config::handle(cmd, flag).await,
        Commands::Fs(cmd) => fs::handle(cmd, flag).await,
        Commands::Process(cmd) => process::handle(cmd, flag).await,
        Commands::Store(cmd) => store::handle(cmd, flag).await,
        Commands::Mongo(cmd) => mongo::handle(cmd, flag).await,
        Commands::Sqlite(cmd) => sqlite::handle(cmd, flag).await,
        Commands::Call(args) => call::run(args, flag).await,
        Commands::AssetUrl(args) => urls::asset_url(args, flag),
        Commands::ProxyUrl(args) => urls::proxy_url(args, flag),
        Commands::Host(cmd) => host::handle(cmd, flag),
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
