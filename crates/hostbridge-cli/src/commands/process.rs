//! `bridge process` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hostbridge_core::capability::process::Options;

use crate::{output, profile};

#[derive(Args, Debug)]
pub struct ProcessCommand {
    #[command(subcommand)]
    pub command: ProcessSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProcessSubcommand {
    /// Open a path with its default application
    Open {
        path: String,
        /// Application to open the path with
        #[arg(long)]
        using: Option<String>,
    },

    /// Run a command on the host and print its output
    Output {
        cmd: String,
        /// Arguments passed to the command (put them after `--`)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        /// Working directory
        #[arg(long)]
        cwd: Option<String>,
    },
}

pub async fn handle(cmd: ProcessCommand, host: Option<&str>) -> Result<()> {
    let bridge = profile::connect(host)?;
    let process = bridge.process();

    match cmd.command {
        ProcessSubcommand::Open { path, using } => {
            process
                .open(&path, using.as_deref())
                .await
                .context("Failed to open path")?;
            output::success(&format!("Opened {}", path));
        }
        ProcessSubcommand::Output { cmd, args, cwd } => {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let options = Options { cwd };
            let result = process
                .output(&cmd, &args, &options)
                .await
                .context("Failed to run command")?;

            print!("{}", result.stdout);
            eprint!("{}", result.stderr);

            if !result.success() {
                let status = result
                    .status
                    .map_or_else(|| "no status".to_string(), |code| code.to_string());
                output::failure(&format!("{} exited with {}", cmd, status));
                std::process::exit(result.status.unwrap_or(1));
            }
        }
    }

    Ok(())
}
