//! Bookkeeping of every live wire in a graph session
//!
//! Owned by the `NodeGraph` rather than held as global state, so teardown
//! code receives it explicitly and tests never share it.

use std::collections::BTreeMap;

use crate::nodes::wire::{MemberRef, Wire, WireId, WireState};
use crate::nodes::NodeId;

/// Ordered map of live wires
#[derive(Debug, Default)]
pub struct WireRegistry {
    wires: BTreeMap<WireId, Wire>,
}

impl WireRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, wire: Wire) {
        self.wires.insert(wire.id, wire);
    }

    pub(crate) fn remove(&mut self, id: WireId) -> Option<Wire> {
        self.wires.remove(&id)
    }

    pub fn get(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    pub fn get_mut(&mut self, id: WireId) -> Option<&mut Wire> {
        self.wires.get_mut(&id)
    }

    pub fn contains(&self, id: WireId) -> bool {
        self.wires.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    /// Snapshot of all wire ids, safe to hold while wires are torn down
    pub fn ids(&self) -> Vec<WireId> {
        self.wires.keys().copied().collect()
    }

    /// Wires with `member` as either endpoint
    pub fn touching_member(&self, member: &MemberRef) -> Vec<WireId> {
        self.wires
            .iter()
            .filter(|(_, w)| w.touches(member))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Wires with an endpoint on any member of `node`
    pub fn touching_node(&self, node: NodeId) -> Vec<WireId> {
        self.wires
            .iter()
            .filter(|(_, w)| w.touches_node(node))
            .map(|(&id, _)| id)
            .collect()
    }

    /// The wire whose target is `member`, other than `except`
    pub fn feeding(&self, member: &MemberRef, except: WireId) -> Option<WireId> {
        self.wires
            .iter()
            .find(|(id, w)| **id != except && w.target() == Some(member))
            .map(|(&id, _)| id)
    }

    pub fn connected_count(&self) -> usize {
        self.wires
            .values()
            .filter(|w| w.state() == WireState::Connected)
            .count()
    }
}
