//! Variable nodes: a display name bound to a single `"value"` member
//!
//! `Variable` reads and `VariableMut` writes a node whose type is
//! `NodeType::Variable`. The node title doubles as the variable's label and is
//! recomputed synchronously on every successful assignment.

use log::debug;

use crate::constants::{display, member};
use crate::error::{Error, Result};
use crate::nodes::member::Member;
use crate::nodes::node::{Node, NodeType};
use crate::nodes::value::{Literal, Value, ValueKind};

/// Read-only view over a variable node
#[derive(Debug, Clone, Copy)]
pub struct Variable<'a> {
    node: &'a Node,
}

impl<'a> Variable<'a> {
    /// Wrap `node`; fails with `InvalidArgument` if it is not a variable
    pub fn new(node: &'a Node) -> Result<Self> {
        if !node.is_variable() {
            return Err(not_a_variable(node));
        }
        Ok(Self { node })
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn name(&self) -> Option<&'a str> {
        match &self.node.node_type {
            NodeType::Variable { name } => name.as_deref(),
            NodeType::Regular => None,
        }
    }

    /// Display label, e.g. `x = 5`
    pub fn label(&self) -> &'a str {
        &self.node.title
    }

    pub fn value_member(&self) -> Result<&'a Member> {
        self.node.get(member::VARIABLE_VALUE)
    }

    pub fn is_set(&self) -> bool {
        self.value_member().map_or(false, |m| m.is_set())
    }

    /// True iff the value is currently bound to `kind`
    pub fn is_type(&self, kind: ValueKind) -> bool {
        self.value_member().map_or(false, |m| m.kind() == Some(kind))
    }

    /// Numeric view: booleans as 0/1, text parsed, unset reported as `Unset`
    pub fn value_as_number(&self) -> Result<f64> {
        self.value_member()?.value().to_number()
    }

    /// Text view: numbers in shortest round-trip form, unset reported as `Unset`
    pub fn value_as_string(&self) -> Result<String> {
        self.value_member()?.value().to_text()
    }

    pub fn type_name(&self) -> &'static str {
        match self.value_member().ok().and_then(|m| m.kind()) {
            Some(kind) => kind.name(),
            None => display::UNKNOWN_TYPE,
        }
    }
}

/// Mutable view over a variable node
#[derive(Debug)]
pub struct VariableMut<'a> {
    node: &'a mut Node,
}

impl<'a> VariableMut<'a> {
    /// Wrap `node`; fails with `InvalidArgument` if it is not a variable
    pub fn new(node: &'a mut Node) -> Result<Self> {
        if !node.is_variable() {
            return Err(not_a_variable(node));
        }
        Ok(Self { node })
    }

    pub fn as_variable(&self) -> Variable<'_> {
        Variable { node: &*self.node }
    }

    /// Give the variable its display name
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::invalid("variable name cannot be empty"));
        }
        if let NodeType::Variable { name: slot } = &mut self.node.node_type {
            *slot = Some(name.to_string());
        }
        refresh_label(self.node);
        Ok(())
    }

    /// Assign through the `"value"` member, then recompute the label
    pub fn set_value(&mut self, literal: impl Into<Literal>) -> Result<()> {
        self.node
            .get_mut(member::VARIABLE_VALUE)?
            .set_value(literal)?;
        refresh_label(self.node);
        Ok(())
    }

    /// Re-bind the value to another kind; the value becomes unset
    pub fn retype(&mut self, kind: ValueKind) -> Result<()> {
        self.node.get_mut(member::VARIABLE_VALUE)?.retype(kind);
        refresh_label(self.node);
        Ok(())
    }
}

fn not_a_variable(node: &Node) -> Error {
    Error::invalid(format!("node {} ('{}') is not a variable", node.id, node.title))
}

/// Label text for a variable with `name` holding `value`
pub fn format_label(name: Option<&str>, value: &Value) -> String {
    let name = name.unwrap_or(display::UNNAMED_VARIABLE);
    match value.get() {
        Ok(Literal::Text(text)) => format!("{}{}{:?}", name, display::LABEL_SEPARATOR, text),
        Ok(literal) => format!("{}{}{}", name, display::LABEL_SEPARATOR, literal),
        Err(_) => name.to_string(),
    }
}

/// Recompute a variable node's title from its name and value; no-op for regular nodes
pub(crate) fn refresh_label(node: &mut Node) {
    let label = match &node.node_type {
        NodeType::Variable { name } => match node.get(member::VARIABLE_VALUE) {
            Ok(value) => format_label(name.as_deref(), value.value()),
            Err(_) => format_label(name.as_deref(), &Value::untyped()),
        },
        NodeType::Regular => return,
    };
    if node.title != label {
        debug!("Variable node {} relabelled '{}' -> '{}'", node.id, node.title, label);
        node.title = label;
    }
}
