//! `bridge call` - raw envelopes for any namespace.

use anyhow::{Context, Result};
use clap::Args;

use hostbridge_core::capability::config::ConfigAction;
use hostbridge_core::capability::db::mongo::MongoAction;
use hostbridge_core::capability::db::sqlite::SqliteAction;
use hostbridge_core::capability::fs::FsAction;
use hostbridge_core::capability::process::ProcessAction;
use hostbridge_core::capability::store::StoreAction;
use hostbridge_core::{Action, BridgeRequest, Namespace};

use super::parse_json;
use crate::{output, profile};

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Namespace, e.g. `fs` or `db/mongo`
    pub namespace: String,

    /// Action name, e.g. `read-dir`
    pub action: String,

    /// Action parameters as JSON
    #[arg(default_value = "{}")]
    pub data: String,

    /// Send the action even if it is not a known action of the namespace
    #[arg(long)]
    pub unchecked: bool,
}

/// Checks `action` against the closed action set of `namespace`.
fn check_action(namespace: Namespace, action: &str) -> Result<()> {
    let checked = match namespace {
        Namespace::Config => ConfigAction::parse(action).map(|_| ()),
        Namespace::Fs => FsAction::parse(action).map(|_| ()),
        Namespace::Process => ProcessAction::parse(action).map(|_| ()),
        Namespace::Store => StoreAction::parse(action).map(|_| ()),
        Namespace::Mongo => MongoAction::parse(action).map(|_| ()),
        Namespace::Sqlite => SqliteAction::parse(action).map(|_| ()),
    };

    checked.context("Use --unchecked to send it anyway")
}

pub async fn run(args: CallArgs, host: Option<&str>) -> Result<()> {
    let namespace: Namespace = args.namespace.parse().context("Invalid namespace")?;
    if !args.unchecked {
        check_action(namespace, &args.action)?;
    }

    let data = parse_json(&args.data, "data")?;
    let request = BridgeRequest::new(args.action, data)?;

    let bridge = profile::connect(host)?;
    let result = bridge
        .requestor(namespace)
        .send(&request)
        .await
        .with_context(|| format!("Call to '{}' failed", request.action))?;

    output::json(&result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_actions_pass() {
        check_action(Namespace::Fs, "read-dir").unwrap();
        check_action(Namespace::Mongo, "create-unique-indexes").unwrap();
        check_action(Namespace::Config, "get").unwrap();
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = check_action(Namespace::Store, "read-dir").unwrap_err();
        assert!(format!("{:#}", err).contains("unknown action 'read-dir'"));
    }
}
