//! Named value slots owned by a node

use log::debug;

use crate::error::Result;
use crate::nodes::value::{Literal, Value, ValueKind};
use crate::nodes::WireId;

/// A named, typed value slot.
///
/// Wire bookkeeping is crate-private: only the graph's wire operations
/// attach or detach wires, which keeps the single incoming wire rule intact.
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    value: Value,
    incoming: Option<WireId>,
    outgoing: Vec<WireId>,
}

impl Member {
    /// Creates an untyped, unset member
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_value(name, Value::untyped())
    }

    /// Creates an unset member bound to `kind`
    pub fn typed(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::from_value(name, Value::typed(kind))
    }

    /// Creates a member holding `literal`
    pub fn with_value(name: impl Into<String>, literal: impl Into<Literal>) -> Self {
        let literal: Literal = literal.into();
        Self::from_value(name, Value::from(literal))
    }

    fn from_value(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            incoming: None,
            outgoing: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> Option<ValueKind> {
        self.value.kind()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_set()
    }

    /// Assign directly. An incoming wire overwrites this on its next transmission.
    pub fn set_value(&mut self, literal: impl Into<Literal>) -> Result<()> {
        match self.value.set(literal) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!("Member '{}' rejected assignment: {}", self.name, e);
                Err(e)
            }
        }
    }

    /// Explicitly re-bind this member to another kind, discarding its value
    pub fn retype(&mut self, kind: ValueKind) {
        debug!("Member '{}' retyped to {}", self.name, kind);
        self.value.retype(kind);
    }

    /// True iff kinds match, or either side has no kind yet
    pub fn accepts_wire_from(&self, other: &Member) -> bool {
        match (self.kind(), other.kind()) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => true,
        }
    }

    /// Wire currently feeding this member
    pub fn incoming(&self) -> Option<WireId> {
        self.incoming
    }

    /// Wires reading this member as their source
    pub fn outgoing(&self) -> &[WireId] {
        &self.outgoing
    }

    pub fn has_wires(&self) -> bool {
        self.incoming.is_some() || !self.outgoing.is_empty()
    }

    pub(crate) fn attach_incoming(&mut self, wire: WireId) {
        self.incoming = Some(wire);
    }

    /// Detach `wire` if it is the incoming one
    pub(crate) fn detach_incoming(&mut self, wire: WireId) {
        if self.incoming == Some(wire) {
            self.incoming = None;
        }
    }

    pub(crate) fn attach_outgoing(&mut self, wire: WireId) {
        if !self.outgoing.contains(&wire) {
            self.outgoing.push(wire);
        }
    }

    pub(crate) fn detach_outgoing(&mut self, wire: WireId) {
        self.outgoing.retain(|&w| w != wire);
    }

    /// Forget every wire; used when a member enters a node
    pub(crate) fn detach_all(&mut self) {
        self.incoming = None;
        self.outgoing.clear();
    }
}
