//! Registration-time parameter binding plans.
//!
//! A [`BindingPlan`] is the static description of how a transformer's
//! parameters bind to the invocation inputs: the source value, the whole
//! context, or named context variables. Plans are built once when a
//! transformer is registered and checked mechanically before each invocation;
//! nothing is inspected at call time beyond the plan itself.

use crate::context::TransformContext;
use crate::error::{Error, Result};
use crate::token::TypeToken;

/// One parameter slot of a transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The slot receives the source value being transformed.
    Source,
    /// The slot receives the whole transformation context.
    Context,
    /// The slot receives a named context variable.
    Variable {
        /// Context variable name.
        name: String,
        /// Declared variable type.
        token: TypeToken,
        /// Whether the variable must be present (and well-typed) at call time.
        required: bool,
    },
}

impl Binding {
    /// Returns a required variable slot for type `T`.
    pub fn variable<T: 'static>(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            token: TypeToken::of::<T>(),
            required: true,
        }
    }

    /// Returns an optional variable slot for type `T`.
    pub fn optional_variable<T: 'static>(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            token: TypeToken::of::<T>(),
            required: false,
        }
    }
}

/// Ordered parameter slots for one transformer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingPlan {
    slots: Vec<Binding>,
}

impl BindingPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot to the plan.
    pub fn with(mut self, binding: Binding) -> Self {
        self.slots.push(binding);
        self
    }

    /// Returns the slots in declaration order.
    pub fn slots(&self) -> &[Binding] {
        &self.slots
    }

    /// Returns whether the plan declares no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Checks a context against the plan's variable slots.
    ///
    /// Fails with an error naming the variable and its declared type when a
    /// required variable is absent, or when a present variable holds a value
    /// of the wrong type. Optional variables may be absent, but when present
    /// they must still match their declared type.
    pub fn ensure(&self, ctx: &TransformContext) -> Result<()> {
        for slot in &self.slots {
            let Binding::Variable {
                name,
                token,
                required,
            } = slot
            else {
                continue;
            };

            match ctx.get_value(name) {
                None if *required => {
                    return Err(Error::MissingVariable {
                        name: name.clone(),
                        expected: token.name(),
                    });
                }
                None => {}
                Some(value) if value.token() != *token => {
                    return Err(Error::VariableType {
                        name: name.clone(),
                        expected: token.name(),
                        actual: value.token().name(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
