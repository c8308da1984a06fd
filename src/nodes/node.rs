//! Node types and core node functionality

use crate::constants;
use crate::error::{Error, Result};
use crate::nodes::component::{Component, Components};
use crate::nodes::member::Member;
use crate::nodes::value::ValueKind;

/// Unique identifier for a node
pub type NodeId = usize;

/// Type of node - plain member container or a named variable
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    /// Regular node with any number of members
    Regular,
    /// Node binding a display name to its `"value"` member
    Variable {
        /// Set once through `VariableMut::set_name`
        name: Option<String>,
    },
}

/// Owner of named members and named components.
///
/// Members keep their insertion order. A node is the unit of identity: its
/// members and components cannot be shared with, or outlive, the node.
/// The id is assigned by the graph and a variable's title is its derived label,
/// so both are read-only outside the crate.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) title: String,
    pub(crate) node_type: NodeType,
    members: Vec<Member>,
    components: Components,
}

impl Node {
    /// Creates a new regular node; the id is assigned when added to a graph
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            node_type: NodeType::Regular,
            members: Vec::new(),
            components: Components::new(),
        }
    }

    /// Creates a new variable node with an untyped `"value"` member
    pub fn new_variable() -> Self {
        let mut node = Self::new(constants::node::VARIABLE_TITLE);
        node.node_type = NodeType::Variable { name: None };
        node.members.push(Member::new(constants::member::VARIABLE_VALUE));
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// Rename a regular node. Variable titles follow their name and value.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        if self.is_variable() {
            return Err(Error::invalid(format!(
                "node {} is a variable; its title is derived from its name",
                self.id
            )));
        }
        self.title = title.into();
        Ok(())
    }

    /// Adds an untyped member
    pub fn add_member(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.push_member(Member::new(name))
    }

    /// Adds an unset member bound to `kind`
    pub fn add_typed_member(
        &mut self,
        name: impl Into<String>,
        kind: ValueKind,
    ) -> Result<&mut Self> {
        self.push_member(Member::typed(name, kind))
    }

    /// Adds a prepared member; names must be unique within the node.
    /// Wire bookkeeping carried over from a cloned member is dropped.
    pub fn push_member(&mut self, mut member: Member) -> Result<&mut Self> {
        if member.name().is_empty() {
            return Err(Error::invalid("member name cannot be empty"));
        }
        if self.has_member(member.name()) {
            return Err(Error::invalid(format!(
                "node {} already has a member named '{}'",
                self.id,
                member.name()
            )));
        }
        member.detach_all();
        self.members.push(member);
        Ok(self)
    }

    /// Look up a member by name
    pub fn get(&self, name: &str) -> Result<&Member> {
        self.members
            .iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| Error::not_found(format!("member '{}' on node {}", name, self.id)))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Member> {
        let id = self.id;
        self.members
            .iter_mut()
            .find(|m| m.name() == name)
            .ok_or_else(|| Error::not_found(format!("member '{}' on node {}", name, id)))
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name() == name)
    }

    /// Members in insertion order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name()).collect()
    }

    pub(crate) fn take_member(&mut self, name: &str) -> Result<Member> {
        let index = self
            .members
            .iter()
            .position(|m| m.name() == name)
            .ok_or_else(|| Error::not_found(format!("member '{}' on node {}", name, self.id)))?;
        Ok(self.members.remove(index))
    }

    /// Attach a component, returning the one previously stored under `name`
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        self.components.insert(name, component)
    }

    /// Capability lookup; `None` means the node does not have it
    pub fn get_component(&self, name: &str) -> Option<&dyn Component> {
        self.components.get(name)
    }

    pub fn get_component_mut(&mut self, name: &str) -> Option<&mut dyn Component> {
        self.components.get_mut(name)
    }

    /// Look up a component and downcast it to a concrete type
    pub fn get_component_as<T: Component>(&self, name: &str) -> Option<&T> {
        self.components.get_as::<T>(name)
    }

    pub fn get_component_as_mut<T: Component>(&mut self, name: &str) -> Option<&mut T> {
        self.components.get_as_mut::<T>(name)
    }

    pub fn remove_component(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.components.remove(name)
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.components.contains(name)
    }

    /// The presentation adapter, if one is attached
    pub fn get_view(&self) -> Option<&dyn Component> {
        self.get_component(constants::component::VIEW)
    }

    /// Check if this is a variable node
    pub fn is_variable(&self) -> bool {
        matches!(self.node_type, NodeType::Variable { .. })
    }
}
