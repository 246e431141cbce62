//! Request-scoped transformation context.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::value::AnyValue;

/// Mutable, string-keyed variable bag threaded through a transformer chain.
///
/// A context is created once per top-level transformation request and passed
/// by mutable reference to every hop. Hops may read, add, or replace
/// variables; the engine never snapshots or isolates the context between
/// hops, so state written by one hop is visible to all later ones.
///
/// A context must not be shared across concurrent top-level requests.
#[derive(Debug, Default)]
pub struct TransformContext {
    vars: HashMap<String, AnyValue>,
}

impl TransformContext {
    /// Creates a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a variable, returning the previously stored value if any.
    pub fn put<T: Send + 'static>(&mut self, name: impl Into<String>, value: T) -> Option<AnyValue> {
        self.vars.insert(name.into(), AnyValue::new(value))
    }

    /// Returns a typed reference to a variable.
    ///
    /// Returns `None` when the variable is absent or holds another type; use
    /// [`require`](Self::require) to distinguish the two.
    pub fn get<T: 'static>(&self, name: &str) -> Option<&T> {
        self.vars.get(name).and_then(AnyValue::downcast_ref)
    }

    /// Returns the erased value stored under a name.
    pub fn get_value(&self, name: &str) -> Option<&AnyValue> {
        self.vars.get(name)
    }

    /// Returns a typed reference to a variable, failing descriptively.
    ///
    /// Errors identify the variable name and the expected type, so a consumer
    /// can report exactly which binding was violated.
    pub fn require<T: 'static>(&self, name: &str) -> Result<&T> {
        let expected = std::any::type_name::<T>();
        match self.vars.get(name) {
            None => Err(Error::MissingVariable {
                name: name.to_owned(),
                expected,
            }),
            Some(value) => value.downcast_ref::<T>().ok_or_else(|| Error::VariableType {
                name: name.to_owned(),
                expected,
                actual: value.token().name(),
            }),
        }
    }

    /// Removes a variable, returning its erased value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<AnyValue> {
        self.vars.remove(name)
    }

    /// Returns whether a variable is present under the given name.
    pub fn contains_key(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Returns the number of stored variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns whether the context holds no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
