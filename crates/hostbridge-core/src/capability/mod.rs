//! Capability clients, one per bridge namespace.
//!
//! Each client wraps a [`BridgeRequestor`](crate::BridgeRequestor) bound to
//! its namespace and exposes one async method per action. Clients hold no
//! other state; they add nothing besides the network call and propagate
//! errors verbatim.

pub mod config;
pub mod db;
pub mod fs;
pub mod process;
pub mod store;

use serde::{Deserialize, Serialize};

/// Page selection for list-style queries. Pages start at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PaginationParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}
