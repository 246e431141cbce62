//! Core error type definitions.

use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the uninterpreted cause carried by higher-level errors, such as
/// a transformer failure surfaced by the engine.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with the core Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the value and context primitives.
#[derive(Debug, Error)]
pub enum Error {
    /// A required context variable is absent.
    #[error("context variable `{name}` is required but absent (expected {expected})")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Type the consumer declared for the variable.
        expected: &'static str,
    },

    /// A context variable holds a value of an unexpected type.
    #[error("context variable `{name}` holds {actual}, expected {expected}")]
    VariableType {
        /// Name of the mistyped variable.
        name: String,
        /// Type the consumer declared for the variable.
        expected: &'static str,
        /// Type actually stored under the name.
        actual: &'static str,
    },

    /// An erased value could not be downcast to the requested type.
    #[error("value of type {actual} cannot be downcast to {expected}")]
    ValueType {
        /// Requested concrete type.
        expected: &'static str,
        /// Type actually carried by the value.
        actual: &'static str,
    },
}
