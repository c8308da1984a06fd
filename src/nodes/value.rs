//! Strictly typed value container held by every member

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::display;
use crate::error::{Error, Result};
use crate::nodes::NodeId;

/// Kinds of data a value can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Boolean,
    Number,
    Text,
    /// Opaque handle to another node
    Reference,
}

impl ValueKind {
    /// Get a human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "Boolean",
            ValueKind::Number => "Number",
            ValueKind::Text => "Text",
            ValueKind::Reference => "Reference",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed literal, the payload of a set value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Boolean(bool),
    Number(f64),
    Text(String),
    Reference(NodeId),
}

impl Literal {
    pub fn kind(&self) -> ValueKind {
        match self {
            Literal::Boolean(_) => ValueKind::Boolean,
            Literal::Number(_) => ValueKind::Number,
            Literal::Text(_) => ValueKind::Text,
            Literal::Reference(_) => ValueKind::Reference,
        }
    }

    /// Convert to a number: booleans become 0/1, text must parse
    pub fn to_number(&self) -> Result<f64> {
        match self {
            Literal::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Literal::Number(n) => Ok(*n),
            Literal::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::mismatch(ValueKind::Number, ValueKind::Text)),
            Literal::Reference(_) => Err(Error::mismatch(ValueKind::Number, ValueKind::Reference)),
        }
    }

    /// Convert to text; numbers use the shortest decimal that parses back exactly
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Text(s) => f.write_str(s),
            Literal::Reference(id) => write!(f, "{}{}", display::REFERENCE_PREFIX, id),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value as f64)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

/// Value slot with an optional fixed kind and an optional payload.
///
/// `kind == None` means untyped; the first assignment binds it.
/// `payload == None` means never assigned. When both are present the
/// payload's kind always equals `kind`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    kind: Option<ValueKind>,
    payload: Option<Literal>,
}

impl Value {
    /// Untyped, unset value
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Unset value already bound to a kind
    pub fn typed(kind: ValueKind) -> Self {
        Self {
            kind: Some(kind),
            payload: None,
        }
    }

    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    pub fn is_set(&self) -> bool {
        self.payload.is_some()
    }

    /// Check the value is bound to `kind`
    pub fn is_kind(&self, kind: ValueKind) -> bool {
        self.kind == Some(kind)
    }

    /// Assign a literal. Fails without mutation if the value is bound to another kind.
    pub fn set(&mut self, literal: impl Into<Literal>) -> Result<()> {
        let literal: Literal = literal.into();
        let incoming = literal.kind();
        if let Some(kind) = self.kind {
            if kind != incoming {
                return Err(Error::mismatch(kind, incoming));
            }
        }
        self.kind = Some(incoming);
        self.payload = Some(literal);
        Ok(())
    }

    /// Re-bind to another kind, discarding the payload
    pub fn retype(&mut self, kind: ValueKind) {
        if self.kind != Some(kind) {
            self.kind = Some(kind);
            self.payload = None;
        }
    }

    pub fn get(&self) -> Result<&Literal> {
        self.payload.as_ref().ok_or(Error::Unset)
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self.get()? {
            Literal::Boolean(b) => Ok(*b),
            other => Err(Error::mismatch(ValueKind::Boolean, other.kind())),
        }
    }

    pub fn as_number(&self) -> Result<f64> {
        match self.get()? {
            Literal::Number(n) => Ok(*n),
            other => Err(Error::mismatch(ValueKind::Number, other.kind())),
        }
    }

    pub fn as_text(&self) -> Result<&str> {
        match self.get()? {
            Literal::Text(s) => Ok(s),
            other => Err(Error::mismatch(ValueKind::Text, other.kind())),
        }
    }

    pub fn as_reference(&self) -> Result<NodeId> {
        match self.get()? {
            Literal::Reference(id) => Ok(*id),
            other => Err(Error::mismatch(ValueKind::Reference, other.kind())),
        }
    }

    /// Numeric view of the value, see `Literal::to_number`
    pub fn to_number(&self) -> Result<f64> {
        self.get()?.to_number()
    }

    /// Text view of the value, see `Literal::to_text`
    pub fn to_text(&self) -> Result<String> {
        Ok(self.get()?.to_text())
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Self {
            kind: Some(literal.kind()),
            payload: Some(literal),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(literal) => literal.fmt(f),
            None => f.write_str(display::UNSET_VALUE),
        }
    }
}
