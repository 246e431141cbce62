//! Transformer units and their composition.
//!
//! This module provides the executable side of the engine:
//! - [`EdgeKey`]: the (source, target) type pair identifying a resolution slot
//! - [`Transformer`]: one registered conversion step
//! - [`TransformerChain`]: an ordered composition of steps
//! - [`TransformerUnit`]: the execution contract shared by both

mod chain;
mod descriptor;
mod key;

pub use chain::{ChainState, TransformerChain};
pub use descriptor::{TransformFn, Transformer};
pub use key::EdgeKey;

use remold_core::context::TransformContext;
use remold_core::value::AnyValue;

use crate::error::TransformResult;

/// Contract for anything that can execute one transformation.
///
/// Implementations receive the erased source value and the request's shared
/// context, and produce the erased result or fail. The engine never inspects
/// how an implementation uses the context.
pub trait TransformerUnit {
    /// Applies the transformation to a value.
    fn apply(&self, value: AnyValue, ctx: &mut TransformContext) -> TransformResult<AnyValue>;
}
