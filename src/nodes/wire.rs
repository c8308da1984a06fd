//! Directed edges carrying a value from one member to another

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::nodes::component::{Component, Components};
use crate::nodes::NodeId;

/// Unique identifier for a wire; drawn from the same counter as node ids
pub type WireId = usize;

/// Non-owning handle to a member: owning node plus member name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    pub node: NodeId,
    pub member: String,
}

impl MemberRef {
    pub fn new(node: NodeId, member: impl Into<String>) -> Self {
        Self {
            node,
            member: member.into(),
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.member)
    }
}

/// Connection state of a wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireState {
    Disconnected,
    Connected,
}

/// Edge between a source member and a target member.
///
/// A wire owns neither endpoint. It is `Connected` only while both endpoints
/// are set, live and kind-compatible; every mutation goes through `NodeGraph`.
#[derive(Debug)]
pub struct Wire {
    pub(crate) id: WireId,
    source: Option<MemberRef>,
    target: Option<MemberRef>,
    state: WireState,
    components: Components,
}

impl Wire {
    pub(crate) fn new(id: WireId) -> Self {
        Self {
            id,
            source: None,
            target: None,
            state: WireState::Disconnected,
            components: Components::new(),
        }
    }

    /// Registry key, fixed at creation
    pub fn id(&self) -> WireId {
        self.id
    }

    pub fn state(&self) -> WireState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == WireState::Connected
    }

    pub fn source(&self) -> Option<&MemberRef> {
        self.source.as_ref()
    }

    pub fn target(&self) -> Option<&MemberRef> {
        self.target.as_ref()
    }

    /// True if either endpoint is `member`
    pub fn touches(&self, member: &MemberRef) -> bool {
        self.source.as_ref() == Some(member) || self.target.as_ref() == Some(member)
    }

    /// True if either endpoint belongs to `node`
    pub fn touches_node(&self, node: NodeId) -> bool {
        self.source.as_ref().map_or(false, |m| m.node == node)
            || self.target.as_ref().map_or(false, |m| m.node == node)
    }

    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        self.components.insert(name, component)
    }

    pub fn get_component(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name)
    }

    pub fn get_component_as<T: Component>(&self, name: &str) -> Option<&T> {
        self.components.get_as::<T>(name)
    }

    pub fn get_component_as_mut<T: Component>(&mut self, name: &str) -> Option<&mut T> {
        self.components.get_as_mut::<T>(name)
    }

    pub fn remove_component(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.components.remove(name)
    }

    /// The presentation adapter, if one is attached
    pub fn get_view(&self) -> Option<&dyn Component> {
        self.get_component(constants::component::VIEW)
    }

    pub(crate) fn replace_source(&mut self, source: Option<MemberRef>) -> Option<MemberRef> {
        std::mem::replace(&mut self.source, source)
    }

    pub(crate) fn replace_target(&mut self, target: Option<MemberRef>) -> Option<MemberRef> {
        std::mem::replace(&mut self.target, target)
    }

    pub(crate) fn set_state(&mut self, state: WireState) {
        self.state = state;
    }
}
