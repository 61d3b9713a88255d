//! `bridge fs` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hostbridge_core::capability::fs::container_entry_path;

use crate::{output, profile};

#[derive(Args, Debug)]
pub struct FsCommand {
    #[command(subcommand)]
    pub command: FsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FsSubcommand {
    /// Show size, kind and modification time of a path
    Stats { path: String },

    /// List the entries of a directory
    ReadDir { path: String },

    /// Create a directory
    CreateDir {
        path: String,
        /// Also create missing parents
        #[arg(long)]
        recursive: bool,
    },

    /// Rename or move a path
    Rename { src: String, dst: String },

    /// Remove a file or directory
    Remove {
        path: String,
        /// Remove directories and their contents
        #[arg(long)]
        recursive: bool,
    },

    /// Copy a file
    CopyFile { src: String, dst: String },

    /// Print a text file
    ReadTextFile { path: String },

    /// Write text to a file, replacing its contents
    WriteTextFile { path: String, data: String },

    /// Have the host download a URL to a path
    DownloadFile { url: String, path: String },

    /// List the entries of an archive
    ReadArchive {
        path: String,
        /// Archive kind, e.g. `zip`
        #[arg(long, default_value = "zip")]
        container: String,
    },
}

pub async fn handle(cmd: FsCommand, host: Option<&str>) -> Result<()> {
    let bridge = profile::connect(host)?;
    let fs = bridge.fs();

    match cmd.command {
        FsSubcommand::Stats { path } => {
            let stats = fs.stats(&path).await.context("Failed to stat path")?;
            output::json(&stats)?;
        }
        FsSubcommand::ReadDir { path } => {
            let names = fs
                .read_dir(&path)
                .await
                .context("Failed to read directory")?;
            output::names(&names, "Directory is empty.");
        }
        FsSubcommand::CreateDir { path, recursive } => {
            fs.create_dir(&path, recursive.then_some(true))
                .await
                .context("Failed to create directory")?;
            output::success(&format!("Created {}", path));
        }
        FsSubcommand::Rename { src, dst } => {
            fs.rename(&src, &dst).await.context("Failed to rename")?;
            output::success(&format!("Renamed {} to {}", src, dst));
        }
        FsSubcommand::Remove { path, recursive } => {
            fs.remove(&path, recursive.then_some(true))
                .await
                .context("Failed to remove")?;
            output::success(&format!("Removed {}", path));
        }
        FsSubcommand::CopyFile { src, dst } => {
            fs.copy_file(&src, &dst)
                .await
                .context("Failed to copy file")?;
            output::success(&format!("Copied {} to {}", src, dst));
        }
        FsSubcommand::ReadTextFile { path } => {
            let text = fs
                .read_text_file(&path)
                .await
                .context("Failed to read file")?;
            print!("{}", text);
        }
        FsSubcommand::WriteTextFile { path, data } => {
            fs.write_text_file(&path, &data)
                .await
                .context("Failed to write file")?;
            output::success(&format!("Wrote {}", path));
        }
        FsSubcommand::DownloadFile { url, path } => {
            fs.download_file(&url, &path)
                .await
                .context("Failed to download file")?;
            output::success(&format!("Downloaded {} to {}", url, path));
        }
        FsSubcommand::ReadArchive { path, container } => {
            let entries = fs
                .read_archive(&path, &container)
                .await
                .context("Failed to read archive")?;
            let entries: Vec<String> = entries
                .iter()
                .map(|entry| container_entry_path(&path, entry))
                .collect();
            output::names(&entries, "Archive is empty.");
        }
    }

    Ok(())
}
