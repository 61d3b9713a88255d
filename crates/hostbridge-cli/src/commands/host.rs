//! `bridge host` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hostbridge_core::HostUrl;

use crate::output;
use crate::profile::{self, Profile, storage};

#[derive(Args, Debug)]
pub struct HostCommand {
    #[command(subcommand)]
    pub command: HostSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum HostSubcommand {
    /// Save a host URL to the profile
    Set { url: String },

    /// Show the host in effect and where it came from
    Show,

    /// Remove the saved profile
    Clear,
}

pub fn handle(cmd: HostCommand, flag: Option<&str>) -> Result<()> {
    match cmd.command {
        HostSubcommand::Set { url } => {
            let host = HostUrl::new(&url).context("Invalid host URL")?;
            let path = storage::save_profile(&Profile {
                host: host.to_string(),
            })
            .context("Failed to save profile")?;

            output::success(&format!("Saved host {}", host));
            output::field("Profile", &path.display().to_string());
        }
        HostSubcommand::Show => {
            let (host, source) = profile::resolve_host(flag)?;
            output::field("Host", host.as_str());
            output::field("Source", source.as_str());
        }
        HostSubcommand::Clear => {
            if storage::clear_profile().context("Failed to clear profile")? {
                output::success("Profile cleared");
            } else {
                output::note("No saved profile.");
            }
        }
    }

    Ok(())
}
