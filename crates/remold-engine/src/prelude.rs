//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types for ergonomic imports:
//!
//! ```rust
//! use remold_engine::prelude::*;
//! ```

pub use remold_core::binding::{Binding, BindingPlan};
pub use remold_core::context::TransformContext;
pub use remold_core::token::TypeToken;
pub use remold_core::value::AnyValue;

pub use crate::error::{RegistryError, RegistryResult, TransformError, TransformResult};
pub use crate::graph::TypeGraph;
pub use crate::registry::{EdgeSet, TransformerRegistry};
pub use crate::request::Transformation;
pub use crate::resolver::{ResolveOptions, ResolvedTransformer, Resolver};
pub use crate::transformer::{ChainState, EdgeKey, Transformer, TransformerChain, TransformerUnit};
