//! Named extension objects attached to nodes and wires
//!
//! A node is polymorphic over whatever components it holds. The core never
//! reads or writes them; outer layers (e.g. a view adapter) look them up by
//! name and downcast to their own types.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;

/// Extension object owned by a node or wire
pub trait Component: Any + Debug + 'static {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + Debug> Component for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Name to component mapping with unique names
#[derive(Debug, Default)]
pub struct Components {
    entries: HashMap<String, Box<dyn Component>>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component, returning the one it replaced
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        component: Box<dyn Component>,
    ) -> Option<Box<dyn Component>> {
        self.entries.insert(name.into(), component)
    }

    /// Absence is not an error: callers treat `None` as "capability not present"
    pub fn get(&self, name: &str) -> Option<&dyn Component> {
        self.entries.get(name).map(|c| &**c)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Component> {
        match self.entries.get_mut(name) {
            Some(c) => Some(&mut **c),
            None => None,
        }
    }

    /// Look up a component and downcast it to `T`
    pub fn get_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(|c| c.as_any().downcast_ref::<T>())
    }

    pub fn get_as_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name).and_then(|c| c.as_any_mut().downcast_mut::<T>())
    }

    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Component>> {
        self.entries.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }
}
