//! Nodle dataflow core
//!
//! Typed value slots (members) owned by nodes, connected by wires that copy a
//! value from a source member to a target member. The graph session owns all
//! nodes and the registry of live wires; layout, rendering, parsing and
//! scheduling live in the layers built on top of it.

pub mod config;
pub mod constants;
pub mod error;
pub mod nodes;

// Re-export commonly used types
pub use config::{GraphConfig, ReconnectPolicy};
pub use error::{Error, Result};
pub use nodes::{
    Component, Literal, Member, MemberRef, Node, NodeGraph, NodeId, NodeType, Value, ValueKind,
    Variable, VariableMut, Wire, WireId, WireState,
};
