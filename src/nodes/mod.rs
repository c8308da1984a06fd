//! Node system - values, members, nodes, wires and the graph session

// Core node system modules
pub mod component;
pub mod graph;
pub mod member;
pub mod node;
pub mod registry;
pub mod value;
pub mod variable;
pub mod wire;

#[cfg(test)]
mod test_propagation;

// Re-export core types
pub use component::{Component, Components};
pub use graph::NodeGraph;
pub use member::Member;
pub use node::{Node, NodeId, NodeType};
pub use registry::WireRegistry;
pub use value::{Literal, Value, ValueKind};
pub use variable::{Variable, VariableMut};
pub use wire::{MemberRef, Wire, WireId, WireState};
