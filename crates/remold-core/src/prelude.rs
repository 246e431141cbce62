//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use remold_core::prelude::*;
//! ```

pub use crate::binding::{Binding, BindingPlan};
pub use crate::context::TransformContext;
pub use crate::error::{BoxedError, Error, Result};
pub use crate::token::TypeToken;
pub use crate::value::AnyValue;
