//! `bridge sqlite` commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use hostbridge_core::capability::db::CreateUniqueIndexParams;

use crate::{output, profile};

#[derive(Args, Debug)]
pub struct SqliteCommand {
    #[command(subcommand)]
    pub command: SqliteSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SqliteSubcommand {
    /// Open the configured database
    Connect,

    /// Run a mutating statement
    Execute { sql: String },

    /// Run a query and print its rows
    Fetch { sql: String },

    /// Drop a table
    Drop { table: String },

    /// Print the row count of every table
    Stats,

    /// Create a unique index over one or more columns
    CreateUniqueIndex {
        table: String,
        #[arg(required = true)]
        columns: Vec<String>,
    },
}

pub async fn handle(cmd: SqliteCommand, host: Option<&str>) -> Result<()> {
    let bridge = profile::connect(host)?;
    let sqlite = bridge.sqlite();

    match cmd.command {
        SqliteSubcommand::Connect => {
            sqlite.connect().await.context("Failed to connect")?;
            output::success("Connected");
        }
        SqliteSubcommand::Execute { sql } => {
            let result = sqlite
                .execute(&sql)
                .await
                .context("Failed to execute statement")?;
            output::field("Rows affected", &result.rows_affected.to_string());
            output::field("Last insert row", &result.last_insert_row.to_string());
        }
        SqliteSubcommand::Fetch { sql } => {
            let rows: Vec<Value> = sqlite.fetch(&sql).await.context("Failed to run query")?;
            output::json(&rows)?;
        }
        SqliteSubcommand::Drop { table } => {
            sqlite.drop(&table).await.context("Failed to drop table")?;
            output::success(&format!("Dropped {}", table));
        }
        SqliteSubcommand::Stats => {
            let stats = sqlite.stats().await.context("Failed to get stats")?;
            output::json(&stats)?;
        }
        SqliteSubcommand::CreateUniqueIndex { table, columns } => {
            let params = [CreateUniqueIndexParams::new(table, columns)];
            let names = sqlite
                .create_unique_indexes(&params)
                .await
                .context("Failed to create index")?;
            output::names(&names, "No index created.");
        }
    }

    Ok(())
}
