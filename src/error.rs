//! Error types for the dataflow core

use thiserror::Error;

use crate::nodes::value::ValueKind;
use crate::nodes::WireId;

/// Errors raised by node, member, wire and variable operations.
///
/// Every variant is recoverable: a failed call leaves the graph as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Name or handle lookup missed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Kind-incompatible assignment, conversion or transmission
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValueKind, found: ValueKind },

    /// Read of a value that was never assigned
    #[error("Value is not set")]
    Unset,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Target already fed by another wire while reconnection is rejected
    #[error("Conflict: member {member} already has incoming wire {existing}")]
    Conflict { member: String, existing: WireId },

    /// Transmission requested on a wire that is not connected
    #[error("Wire {0} is not connected")]
    NotConnected(WireId),
}

impl Error {
    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Error::InvalidArgument(what.into())
    }

    pub(crate) fn mismatch(expected: ValueKind, found: ValueKind) -> Self {
        Error::TypeMismatch { expected, found }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
