//! Transformation request builder.

use std::marker::PhantomData;

use remold_core::context::TransformContext;
use remold_core::token::TypeToken;
use remold_core::value::AnyValue;

use crate::error::{TransformError, TransformResult};
use crate::registry::TransformerRegistry;
use crate::resolver::{ResolveOptions, Resolver};
use crate::transformer::TransformerUnit;

/// Tracing target for request operations.
const TRACING_TARGET: &str = "remold_engine::request";

/// A configurable transformation request into a target type.
///
/// This is the only way external code constructs a resolution request. The
/// target type is fixed at construction; the source type is taken from the
/// value handed to [`perform_on`](Self::perform_on). In between, requests may
/// name explicit intermediate types, enable derivation, state preferred
/// transformer names, and seed context variables:
///
/// ```rust
/// use remold_engine::prelude::*;
///
/// let mut registry = TransformerRegistry::new();
/// registry.register(Transformer::from_fn(|n: u32, _ctx| i64::from(n)))?;
/// registry.register(Transformer::from_fn(|n: i64, _ctx| n.to_string()))?;
///
/// let text: String = Transformation::new(&registry)
///     .deriving()?
///     .perform_on(7u32)?;
/// assert_eq!(text, "7");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Explicit intermediate types and derivation are mutually exclusive;
/// requesting both fails at the second call, before any resolution work.
pub struct Transformation<'r, T> {
    registry: &'r TransformerRegistry,
    target: TypeToken,
    context: TransformContext,
    options: ResolveOptions,
    steps: Vec<TypeToken>,
    _marker: PhantomData<fn() -> T>,
}

impl<'r, T: Send + 'static> Transformation<'r, T> {
    /// Starts a request into the target type `T` against a registry.
    pub fn new(registry: &'r TransformerRegistry) -> Self {
        Self {
            registry,
            target: TypeToken::of::<T>(),
            context: TransformContext::new(),
            options: ResolveOptions::new(),
            steps: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Routes the transformation through an explicit intermediate type.
    ///
    /// Repeated calls append intermediates in order. Fails when derivation
    /// has already been requested.
    pub fn through<I: 'static>(mut self) -> TransformResult<Self> {
        if self.options.allow_derived() {
            return Err(conflicting_path_config());
        }
        self.steps.push(TypeToken::of::<I>());
        Ok(self)
    }

    /// Asks the engine to derive the shortest transformation path.
    ///
    /// Fails when explicit intermediate types have already been named.
    pub fn deriving(mut self) -> TransformResult<Self> {
        if !self.steps.is_empty() {
            return Err(conflicting_path_config());
        }
        self.options = self.options.deriving();
        Ok(self)
    }

    /// States a preferred transformer name for resolving ambiguous edges.
    ///
    /// Repeated calls accumulate names in caller order; the first one
    /// matching a candidate wins on each edge.
    pub fn using(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_name(name);
        self
    }

    /// Seeds a context variable visible to every hop of the transformation.
    pub fn with_var<V: Send + 'static>(mut self, name: impl Into<String>, value: V) -> Self {
        self.context.put(name, value);
        self
    }

    /// Resolves and executes the transformation on a source value.
    ///
    /// The context built by [`with_var`](Self::with_var) is created once for
    /// this request and passed to every hop; it is discarded when the request
    /// completes.
    pub fn perform_on<S: Send + 'static>(mut self, source: S) -> TransformResult<T> {
        let from = TypeToken::of::<S>();
        let resolver = Resolver::new(self.registry);

        let resolved = if self.steps.is_empty() {
            resolver.resolve(from, self.target, &self.options)?
        } else {
            let mut path = Vec::with_capacity(self.steps.len() + 2);
            path.push(from);
            path.extend(self.steps.iter().copied());
            path.push(self.target);
            resolver.resolve_path(&path, &self.options)?
        };

        tracing::debug!(
            target: TRACING_TARGET,
            from = %from,
            to = %self.target,
            hops = resolved.hops(),
            "Performing transformation"
        );

        let out = resolved.apply(AnyValue::new(source), &mut self.context)?;
        Ok(out.downcast::<T>()?)
    }
}

impl<T> std::fmt::Debug for Transformation<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformation")
            .field("target", &self.target)
            .field("steps", &self.steps)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn conflicting_path_config() -> TransformError {
    TransformError::Configuration(
        "a transformation path cannot be derived and specified simultaneously".to_owned(),
    )
}
