//! Transformer edge key.

use derive_more::Display;
use remold_core::token::TypeToken;

/// Ordered (source, target) type pair identifying a resolution slot.
///
/// Multiple transformers may be registered under one key; conflict
/// resolution between them happens at resolve time, never at lookup time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{from} -> {to}")]
pub struct EdgeKey {
    /// Source type of the edge.
    pub from: TypeToken,
    /// Target type of the edge.
    pub to: TypeToken,
}

impl EdgeKey {
    /// Creates a key from two tokens.
    pub const fn new(from: TypeToken, to: TypeToken) -> Self {
        Self { from, to }
    }

    /// Returns the key for a concrete type pair.
    pub fn of<S: 'static, T: 'static>() -> Self {
        Self::new(TypeToken::of::<S>(), TypeToken::of::<T>())
    }
}
