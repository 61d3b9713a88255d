//! `process` namespace: opening paths and running commands on the host.

use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeRequestor, make_bridge_requestor};
use crate::traits::{Action, Transport};
use crate::{Namespace, Result};

/// Actions accepted by `/api/bridges/process`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessAction {
    Open,
    Output,
}

impl Action for ProcessAction {
    const NAMESPACE: Namespace = Namespace::Process;
    const ALL: &'static [Self] = &[ProcessAction::Open, ProcessAction::Output];

    fn as_str(&self) -> &'static str {
        match self {
            ProcessAction::Open => "open",
            ProcessAction::Output => "output",
        }
    }
}

/// Options for running a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Working directory of the spawned process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl Options {
    pub fn cwd(cwd: impl Into<String>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; absent when the process was killed by a signal or the
    /// status could not be determined.
    #[serde(default)]
    pub status: Option<i32>,
}

impl Output {
    /// Returns true if the process exited with code 0.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

#[derive(Debug, Serialize)]
struct OpenParams<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    using: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OutputParams<'a> {
    cmd: &'a str,
    args: &'a [&'a str],
    options: &'a Options,
}

/// Client for the `process` namespace.
#[derive(Debug, Clone)]
pub struct Client<T> {
    request: BridgeRequestor<T>,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self {
            request: make_bridge_requestor(transport, ProcessAction::NAMESPACE),
        }
    }

    /// Opens `path` with the host's default handler, or with the `using` application.
    pub async fn open(&self, path: &str, using: Option<&str>) -> Result<()> {
        self.request
            .call(ProcessAction::Open, OpenParams { path, using })
            .await
    }

    /// Runs `cmd` to completion and returns its captured output.
    pub async fn output(&self, cmd: &str, args: &[&str], options: &Options) -> Result<Output> {
        self.request
            .call(ProcessAction::Output, OutputParams { cmd, args, options })
            .await
    }
}
