//! Registered transformer descriptor.

use std::sync::Arc;

use remold_core::BoxedError;
use remold_core::binding::BindingPlan;
use remold_core::context::TransformContext;
use remold_core::value::AnyValue;

use super::TransformerUnit;
use super::key::EdgeKey;
use crate::error::{TransformError, TransformResult};

/// Erased transformer callable.
pub type TransformFn =
    dyn Fn(AnyValue, &mut TransformContext) -> Result<AnyValue, BoxedError> + Send + Sync;

/// One registered conversion step from a source type to a target type.
///
/// A transformer carries its edge key, a name (derived from the type pair
/// when the registrant supplies none), a default flag used for conflict
/// resolution, an optional [`BindingPlan`] describing the context variables
/// it consumes, and the erased callable itself.
///
/// The typed constructors erase the closure at the registration boundary;
/// the engine never inspects signatures afterwards.
#[derive(Clone)]
pub struct Transformer {
    key: EdgeKey,
    name: String,
    is_default: bool,
    plan: Option<BindingPlan>,
    func: Arc<TransformFn>,
}

impl Transformer {
    /// Creates a transformer from a fallible conversion closure.
    ///
    /// The failure type is boxed uninterpreted; the engine reports it as the
    /// cause of an execution error without looking inside.
    pub fn new<S, T, E, F>(f: F) -> Self
    where
        S: Send + 'static,
        T: Send + 'static,
        E: Into<BoxedError>,
        F: Fn(S, &mut TransformContext) -> Result<T, E> + Send + Sync + 'static,
    {
        let key = EdgeKey::of::<S, T>();
        let func = move |value: AnyValue, ctx: &mut TransformContext| {
            let source = value.downcast::<S>()?;
            let out = f(source, ctx).map_err(Into::into)?;
            Ok::<_, BoxedError>(AnyValue::new(out))
        };

        Self {
            key,
            name: derived_name(&key),
            is_default: false,
            plan: None,
            func: Arc::new(func),
        }
    }

    /// Creates a transformer from an infallible conversion closure.
    pub fn from_fn<S, T, F>(f: F) -> Self
    where
        S: Send + 'static,
        T: Send + 'static,
        F: Fn(S, &mut TransformContext) -> T + Send + Sync + 'static,
    {
        Self::new(move |source: S, ctx: &mut TransformContext| Ok::<_, BoxedError>(f(source, ctx)))
    }

    /// Overrides the derived name.
    ///
    /// Names disambiguate competing transformers on one edge; they must be
    /// unique per edge.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Marks this transformer as the default for its edge.
    ///
    /// At most one transformer per edge may be the default.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Attaches a binding plan, checked before every invocation.
    pub fn with_plan(mut self, plan: BindingPlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Returns the edge key this transformer is registered under.
    #[inline]
    pub const fn key(&self) -> EdgeKey {
        self.key
    }

    /// Returns the transformer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is the default transformer for its edge.
    #[inline]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Returns the binding plan, if one was attached.
    pub fn plan(&self) -> Option<&BindingPlan> {
        self.plan.as_ref()
    }
}

impl TransformerUnit for Transformer {
    fn apply(&self, value: AnyValue, ctx: &mut TransformContext) -> TransformResult<AnyValue> {
        if let Some(plan) = &self.plan {
            plan.ensure(ctx)?;
        }

        (self.func)(value, ctx).map_err(|cause| TransformError::Execution {
            hop: 1,
            from: self.key.from,
            to: self.key.to,
            name: self.name.clone(),
            cause,
        })
    }
}

impl std::fmt::Debug for Transformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transformer")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("is_default", &self.is_default)
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}

/// Derives a transformer name from its type pair, e.g. `u32_to_String`.
fn derived_name(key: &EdgeKey) -> String {
    format!("{}_to_{}", key.from.short_name(), key.to.short_name())
}
