//! `bridge config` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::{output, profile};

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the full application configuration
    Get,

    /// Print one variable from a variable group
    Var {
        /// Variable group, e.g. `default`
        group: String,
        key: String,
    },
}

pub async fn handle(cmd: ConfigCommand, host: Option<&str>) -> Result<()> {
    let bridge = profile::connect(host)?;
    let config = bridge
        .config()
        .get()
        .await
        .context("Failed to get configuration")?;

    match cmd.command {
        ConfigSubcommand::Get => output::json(&config)?,
        ConfigSubcommand::Var { group, key } => {
            let value = config
                .var(&group, &key)
                .with_context(|| format!("No variable '{}' in group '{}'", key, group))?;
            println!("{}", value);
        }
    }

    Ok(())
}
