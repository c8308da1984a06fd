//! Session configuration for a node graph
//!
//! Plain `Default` structs that can be persisted as JSON next to a project.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What `set_target` does when the target member is already fed by another wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconnectPolicy {
    /// Disconnect the previous incoming wire, then attach the new one
    Replace,
    /// Refuse with `Error::Conflict` until the caller disconnects explicitly
    Reject,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        ReconnectPolicy::Replace
    }
}

/// Configuration for a `NodeGraph` session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Policy applied when a wire targets an already-fed member
    pub reconnect_policy: ReconnectPolicy,
    /// Recompute a Variable's label when a wire writes into it
    pub refresh_labels_on_transmit: bool,
    /// Log every transmission at debug level
    pub debug_logging: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            reconnect_policy: ReconnectPolicy::default(),
            refresh_labels_on_transmit: true,
            debug_logging: false,
        }
    }
}

impl GraphConfig {
    /// Strict configuration: reconnection requires an explicit disconnect
    pub fn strict() -> Self {
        Self {
            reconnect_policy: ReconnectPolicy::Reject,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::invalid(format!("graph config: {}", e)))
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::not_found(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::invalid(format!("graph config: {}", e)))
    }
}
