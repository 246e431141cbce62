//! Erased value container.

use std::any::Any;

use crate::error::{Error, Result};
use crate::token::TypeToken;

/// A value whose concrete type has been erased, tagged with its [`TypeToken`].
///
/// This is the representation that flows between the hops of a transformer
/// chain: each hop receives an `AnyValue`, downcasts it to its declared source
/// type, and produces a new `AnyValue` for the next hop.
pub struct AnyValue {
    token: TypeToken,
    inner: Box<dyn Any + Send>,
}

impl AnyValue {
    /// Wraps a concrete value.
    pub fn new<T: Send + 'static>(value: T) -> Self {
        Self {
            token: TypeToken::of::<T>(),
            inner: Box::new(value),
        }
    }

    /// Returns the token of the carried type.
    #[inline]
    pub const fn token(&self) -> TypeToken {
        self.token
    }

    /// Returns whether the carried value is of type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.token == TypeToken::of::<T>()
    }

    /// Consumes the value, downcasting it to `T`.
    pub fn downcast<T: 'static>(self) -> Result<T> {
        match self.inner.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(_) => Err(Error::ValueType {
                expected: TypeToken::of::<T>().name(),
                actual: self.token.name(),
            }),
        }
    }

    /// Returns a reference to the carried value as `T`, if it is one.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyValue").field("token", &self.token).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_roundtrip() {
        let value = AnyValue::new(42u32);
        assert!(value.is::<u32>());
        assert_eq!(value.downcast::<u32>().unwrap(), 42);
    }

    #[test]
    fn test_downcast_mismatch_names_both_types() {
        let value = AnyValue::new("hello".to_string());
        let err = value.downcast::<u32>().unwrap_err();
        match err {
            Error::ValueType { expected, actual } => {
                assert_eq!(expected, "u32");
                assert_eq!(actual, "alloc::string::String");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_downcast_ref_does_not_consume() {
        let value = AnyValue::new(7i64);
        assert_eq!(value.downcast_ref::<i64>(), Some(&7));
        assert_eq!(value.downcast_ref::<i32>(), None);
        assert_eq!(value.downcast::<i64>().unwrap(), 7);
    }
}
