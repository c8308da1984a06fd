//! Node graph session: owns the nodes and the wire registry
//!
//! Every operation that touches a wire and its endpoint members goes through
//! here, so a wire and the members it references are always updated together.
//! Propagation is never automatic: callers decide when `transmit` runs.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::config::{GraphConfig, ReconnectPolicy};
use crate::constants;
use crate::error::{Error, Result};
use crate::nodes::member::Member;
use crate::nodes::node::{Node, NodeId};
use crate::nodes::registry::WireRegistry;
use crate::nodes::value::Literal;
use crate::nodes::variable::{self, Variable, VariableMut};
use crate::nodes::wire::{MemberRef, Wire, WireId, WireState};

/// A graph containing nodes and the wires between their members
#[derive(Debug, Default)]
pub struct NodeGraph {
    nodes: HashMap<NodeId, Node>,
    wires: WireRegistry,
    next_id: usize,
    config: GraphConfig,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.allocate_id();
        node.id = id;
        info!("Added node {} '{}'", id, node.title);
        self.nodes.insert(id, node);
        id
    }

    /// Creates a variable node named `name`
    pub fn add_variable(&mut self, name: &str) -> Result<NodeId> {
        let mut node = Node::new_variable();
        VariableMut::new(&mut node)?.set_name(name)?;
        Ok(self.add_node(node))
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(&id)
            .ok_or_else(|| Error::not_found(format!("node {}", id)))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("node {}", id)))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in ascending order
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve a member handle
    pub fn member(&self, member: &MemberRef) -> Result<&Member> {
        self.node(member.node)?.get(&member.member)
    }

    pub fn member_mut(&mut self, member: &MemberRef) -> Result<&mut Member> {
        self.node_mut(member.node)?.get_mut(&member.member)
    }

    /// Assign a member directly. Variables have their label refreshed.
    pub fn set_value(&mut self, member: &MemberRef, literal: impl Into<Literal>) -> Result<()> {
        let node = self.node_mut(member.node)?;
        node.get_mut(&member.member)?.set_value(literal)?;
        variable::refresh_label(node);
        Ok(())
    }

    pub fn variable(&self, id: NodeId) -> Result<Variable<'_>> {
        Variable::new(self.node(id)?)
    }

    pub fn variable_mut(&mut self, id: NodeId) -> Result<VariableMut<'_>> {
        VariableMut::new(self.node_mut(id)?)
    }

    /// Removes a node after disconnecting every wire that references its members
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        if !self.nodes.contains_key(&id) {
            return Err(Error::not_found(format!("node {}", id)));
        }
        for wire in self.wires.touching_node(id) {
            self.disconnect(wire)?;
        }
        let node = self
            .nodes
            .remove(&id)
            .ok_or_else(|| Error::not_found(format!("node {}", id)))?;
        info!("Removed node {} '{}'", id, node.title);
        Ok(node)
    }

    /// Removes one member after disconnecting every wire that references it
    pub fn remove_member(&mut self, member: &MemberRef) -> Result<Member> {
        let node = self.node(member.node)?;
        node.get(&member.member)?;
        if node.is_variable() && member.member == constants::member::VARIABLE_VALUE {
            return Err(Error::invalid(format!(
                "cannot remove the value member of variable node {}",
                member.node
            )));
        }
        for wire in self.wires.touching_member(member) {
            self.disconnect(wire)?;
        }
        let removed = self.node_mut(member.node)?.take_member(&member.member)?;
        info!("Removed member {}", member);
        Ok(removed)
    }

    /// The session's wire registry
    pub fn wires(&self) -> &WireRegistry {
        &self.wires
    }

    /// Creates a disconnected wire and registers it
    pub fn create_wire(&mut self) -> WireId {
        let id = self.allocate_id();
        self.wires.insert(Wire::new(id));
        info!("Created wire {}", id);
        id
    }

    pub fn wire(&self, id: WireId) -> Result<&Wire> {
        self.wires
            .get(id)
            .ok_or_else(|| Error::not_found(format!("wire {}", id)))
    }

    /// Mutable access for attaching components; id and endpoints stay graph-managed
    pub fn wire_mut(&mut self, id: WireId) -> Result<&mut Wire> {
        self.wires
            .get_mut(id)
            .ok_or_else(|| Error::not_found(format!("wire {}", id)))
    }

    /// Wires with `member` as either endpoint
    pub fn wires_touching(&self, member: &MemberRef) -> Vec<WireId> {
        self.wires.touching_member(member)
    }

    /// Creates a wire from `source` to `target`. Nothing is left behind on failure.
    pub fn connect(&mut self, source: MemberRef, target: MemberRef) -> Result<WireId> {
        self.member(&source)?;
        self.member(&target)?;
        let id = self.create_wire();
        let attached = self
            .set_source(id, source)
            .and_then(|_| self.set_target(id, target));
        match attached {
            Ok(()) => Ok(id),
            Err(e) => {
                self.remove_wire(id)?;
                Err(e)
            }
        }
    }

    /// Point a wire at its source member
    pub fn set_source(&mut self, id: WireId, source: MemberRef) -> Result<()> {
        let wire = self.wire(id)?;
        self.member(&source)?;
        if wire.target() == Some(&source) {
            return Err(Error::invalid(format!("wire {} cannot read and write {}", id, source)));
        }
        if wire.source() == Some(&source) {
            self.refresh_state(id);
            return Ok(());
        }

        let previous = self.wire_mut(id)?.replace_source(Some(source.clone()));
        if let Some(previous) = previous {
            if let Ok(member) = self.member_mut(&previous) {
                member.detach_outgoing(id);
            }
        }
        self.member_mut(&source)?.attach_outgoing(id);
        debug!("Wire {} source -> {}", id, source);
        self.refresh_state(id);
        Ok(())
    }

    /// Point a wire at its target member.
    ///
    /// A member accepts a single incoming wire. If another wire already feeds
    /// `target`, the configured `ReconnectPolicy` either disconnects it or
    /// rejects the call with `Error::Conflict`.
    pub fn set_target(&mut self, id: WireId, target: MemberRef) -> Result<()> {
        let wire = self.wire(id)?;
        self.member(&target)?;
        if wire.source() == Some(&target) {
            return Err(Error::invalid(format!("wire {} cannot read and write {}", id, target)));
        }
        if wire.target() == Some(&target) {
            self.refresh_state(id);
            return Ok(());
        }

        if let Some(other) = self.wires.feeding(&target, id) {
            match self.config.reconnect_policy {
                ReconnectPolicy::Reject => {
                    return Err(Error::Conflict {
                        member: target.to_string(),
                        existing: other,
                    });
                }
                ReconnectPolicy::Replace => {
                    warn!("Wire {} displaces wire {} as input of {}", id, other, target);
                    self.disconnect(other)?;
                }
            }
        }

        let previous = self.wire_mut(id)?.replace_target(Some(target.clone()));
        if let Some(previous) = previous {
            if let Ok(member) = self.member_mut(&previous) {
                member.detach_incoming(id);
            }
        }
        self.member_mut(&target)?.attach_incoming(id);
        debug!("Wire {} target -> {}", id, target);
        self.refresh_state(id);
        Ok(())
    }

    /// Detach the source endpoint; the wire becomes disconnected
    pub fn clear_source(&mut self, id: WireId) -> Result<()> {
        if let Some(previous) = self.wire_mut(id)?.replace_source(None) {
            if let Ok(member) = self.member_mut(&previous) {
                member.detach_outgoing(id);
            }
        }
        self.refresh_state(id);
        Ok(())
    }

    /// Detach the target endpoint; the wire becomes disconnected
    pub fn clear_target(&mut self, id: WireId) -> Result<()> {
        if let Some(previous) = self.wire_mut(id)?.replace_target(None) {
            if let Ok(member) = self.member_mut(&previous) {
                member.detach_incoming(id);
            }
        }
        self.refresh_state(id);
        Ok(())
    }

    /// Clear both endpoints. The wire stays registered and can be reconnected.
    pub fn disconnect(&mut self, id: WireId) -> Result<()> {
        self.clear_source(id)?;
        self.clear_target(id)?;
        debug!("Wire {} disconnected", id);
        Ok(())
    }

    /// Disconnect and unregister a wire
    pub fn remove_wire(&mut self, id: WireId) -> Result<Wire> {
        self.disconnect(id)?;
        let wire = self
            .wires
            .remove(id)
            .ok_or_else(|| Error::not_found(format!("wire {}", id)))?;
        info!("Removed wire {}", id);
        Ok(wire)
    }

    /// Copy the source member's value into the target member.
    ///
    /// Fails with `NotConnected`, `Unset` (source never assigned) or
    /// `TypeMismatch` (kinds drifted since connecting). A failed transmission
    /// leaves both endpoints untouched.
    pub fn transmit(&mut self, id: WireId) -> Result<()> {
        let wire = self.wire(id)?;
        let (source, target) = match (wire.state(), wire.source(), wire.target()) {
            (WireState::Connected, Some(source), Some(target)) => (source.clone(), target.clone()),
            _ => return Err(Error::NotConnected(id)),
        };

        let literal = self.member(&source)?.value().get()?.clone();
        let refresh_labels = self.config.refresh_labels_on_transmit;
        let debug_logging = self.config.debug_logging;

        let node = self.node_mut(target.node)?;
        if let Err(e) = node.get_mut(&target.member)?.set_value(literal) {
            warn!("Wire {} failed to transmit {} -> {}: {}", id, source, target, e);
            return Err(e);
        }
        if refresh_labels {
            variable::refresh_label(node);
        }
        if debug_logging {
            debug!("Wire {} transmitted {} -> {}", id, source, target);
        }
        Ok(())
    }

    /// Recompute a wire's state from its endpoints
    fn refresh_state(&mut self, id: WireId) {
        let connected = match self.wires.get(id) {
            Some(wire) => match (wire.source(), wire.target()) {
                (Some(source), Some(target)) => match (self.member(source), self.member(target)) {
                    (Ok(source), Ok(target)) => target.accepts_wire_from(source),
                    _ => false,
                },
                _ => false,
            },
            None => return,
        };
        let state = if connected {
            WireState::Connected
        } else {
            WireState::Disconnected
        };
        if let Some(wire) = self.wires.get_mut(id) {
            if wire.state() != state {
                debug!("Wire {} {:?} -> {:?}", id, wire.state(), state);
                wire.set_state(state);
            }
        }
    }
}
