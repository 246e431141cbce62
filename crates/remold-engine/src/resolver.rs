//! Transformer resolution.

use remold_core::context::TransformContext;
use remold_core::token::TypeToken;
use remold_core::value::AnyValue;

use crate::error::{TransformError, TransformResult};
use crate::registry::TransformerRegistry;
use crate::transformer::{EdgeKey, Transformer, TransformerChain, TransformerUnit};

/// Tracing target for resolution operations.
const TRACING_TARGET: &str = "remold_engine::resolver";

/// Options applied while resolving a transformation.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    names: Vec<String>,
    allow_derived: bool,
}

impl ResolveOptions {
    /// Creates options with no preferred names and derivation disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a preferred transformer name.
    ///
    /// Names are scanned in the order they were added; the first one matching
    /// a candidate on an ambiguous edge wins. Names apply per edge only; they
    /// never influence which route derivation picks.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        self
    }

    /// Enables multi-hop derivation when no direct edge matches.
    pub fn deriving(mut self) -> Self {
        self.allow_derived = true;
        self
    }

    /// Returns the preferred names in caller order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns whether derivation is enabled.
    #[inline]
    pub const fn allow_derived(&self) -> bool {
        self.allow_derived
    }
}

/// Outcome of a successful resolution: a single registered transformer for a
/// direct edge, or a composed chain for a multi-hop route.
#[derive(Debug, Clone)]
pub enum ResolvedTransformer {
    /// A direct edge resolved to one registered transformer.
    Unit(Transformer),
    /// A multi-hop route composed into a chain.
    Chain(TransformerChain),
}

impl ResolvedTransformer {
    /// Returns the number of hops this resolution executes.
    pub fn hops(&self) -> usize {
        match self {
            Self::Unit(_) => 1,
            Self::Chain(chain) => chain.len(),
        }
    }
}

impl TransformerUnit for ResolvedTransformer {
    fn apply(&self, value: AnyValue, ctx: &mut TransformContext) -> TransformResult<AnyValue> {
        match self {
            Self::Unit(transformer) => transformer.apply(value, ctx),
            Self::Chain(chain) => chain.apply(value, ctx),
        }
    }
}

/// Resolves transformation requests against a registry.
///
/// The resolver borrows the registry immutably, so it can only run against a
/// finished (post-setup) registry; any number of resolvers may run in
/// parallel against the same one.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a TransformerRegistry,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over a registry.
    pub fn new(registry: &'a TransformerRegistry) -> Self {
        Self { registry }
    }

    /// Resolves a transformation from `from` to `to`.
    ///
    /// A direct edge is always preferred. When no direct edge exists and
    /// derivation is enabled, the shortest registered route is composed into
    /// a chain, resolving every hop as a direct edge. An ambiguous direct
    /// edge fails without falling back to derivation.
    pub fn resolve(
        &self,
        from: TypeToken,
        to: TypeToken,
        options: &ResolveOptions,
    ) -> TransformResult<ResolvedTransformer> {
        match self.resolve_direct(EdgeKey::new(from, to), options.names()) {
            Ok(transformer) => Ok(ResolvedTransformer::Unit(transformer)),
            Err(TransformError::NoTransformer { .. }) if options.allow_derived() => {
                self.resolve_derived(from, to, options)
            }
            Err(err) => Err(err),
        }
    }

    /// Resolves an explicit transformation path.
    ///
    /// `path` names every visited type in order, source first and target
    /// last. Each consecutive pair must resolve as a direct edge; a missing
    /// edge fails fast naming that specific hop, and the resolver never falls
    /// back to derivation for it.
    pub fn resolve_path(
        &self,
        path: &[TypeToken],
        options: &ResolveOptions,
    ) -> TransformResult<ResolvedTransformer> {
        if path.len() < 2 {
            return Err(TransformError::Configuration(
                "an explicit transformation path requires at least a source and a target type"
                    .to_owned(),
            ));
        }

        let mut chain = TransformerChain::new();
        for pair in path.windows(2) {
            let step = self.resolve_direct(EdgeKey::new(pair[0], pair[1]), options.names())?;
            chain.add_step(step);
        }

        tracing::debug!(
            target: TRACING_TARGET,
            from = %path[0],
            to = %path[path.len() - 1],
            hops = chain.len(),
            "Resolved explicit transformation path"
        );
        Ok(ResolvedTransformer::Chain(chain))
    }

    /// Derives the shortest route and composes it into a chain.
    fn resolve_derived(
        &self,
        from: TypeToken,
        to: TypeToken,
        options: &ResolveOptions,
    ) -> TransformResult<ResolvedTransformer> {
        let route = self.registry.graph().shortest_path(from, to);
        if route.is_empty() {
            return Err(TransformError::NoPath { from, to });
        }

        tracing::debug!(
            target: TRACING_TARGET,
            from = %from,
            to = %to,
            hops = route.len(),
            "Derived transformation route"
        );

        let mut chain = TransformerChain::new();
        let mut prev = from;
        for step in route {
            chain.add_step(self.resolve_direct(EdgeKey::new(prev, step), options.names())?);
            prev = step;
        }
        Ok(ResolvedTransformer::Chain(chain))
    }

    /// Resolves one direct edge, applying the ambiguity policy.
    ///
    /// Policy, in priority order: a set of one resolves to that transformer;
    /// otherwise the first preferred name matching a candidate wins;
    /// otherwise the unique default wins; otherwise the edge is ambiguous and
    /// the error names every candidate.
    fn resolve_direct(&self, key: EdgeKey, names: &[String]) -> TransformResult<Transformer> {
        let no_transformer = || TransformError::NoTransformer {
            from: key.from,
            to: key.to,
        };

        let Some(set) = self.registry.lookup(&key) else {
            return Err(no_transformer());
        };

        if let [single] = set.transformers() {
            return Ok(single.clone());
        }
        if set.is_empty() {
            return Err(no_transformer());
        }

        for name in names {
            if let Some(transformer) = set.get_by_name(name) {
                tracing::debug!(
                    target: TRACING_TARGET,
                    edge = %key,
                    name = name.as_str(),
                    "Resolved conflict by preferred name"
                );
                return Ok(transformer.clone());
            }
        }

        if let Some(transformer) = set.get_default() {
            tracing::debug!(
                target: TRACING_TARGET,
                edge = %key,
                name = transformer.name(),
                "Resolved conflict by default transformer"
            );
            return Ok(transformer.clone());
        }

        Err(TransformError::Ambiguous {
            from: key.from,
            to: key.to,
            candidates: set.names(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;
    struct C;
    struct D;
    struct E;

    /// Transformer that records its name into the `route` context variable.
    fn step<S, T>(name: &str, make: fn() -> T) -> Transformer
    where
        S: Send + 'static,
        T: Send + 'static,
    {
        let label = name.to_owned();
        Transformer::new(move |_: S, ctx: &mut TransformContext| {
            let mut route = ctx
                .remove("route")
                .map_or_else(Vec::new, |v| v.downcast::<Vec<String>>().unwrap_or_default());
            route.push(label.clone());
            ctx.put("route", route);
            Ok::<_, remold_core::BoxedError>(make())
        })
        .with_name(name)
    }

    fn diamond_registry() -> TransformerRegistry {
        // A -> B -> C -> D plus B -> E -> D: two 3-hop routes from A to D.
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("a_to_b", || B)).unwrap();
        registry.register(step::<B, C>("b_to_c", || C)).unwrap();
        registry.register(step::<C, D>("c_to_d", || D)).unwrap();
        registry.register(step::<B, E>("b_to_e", || E)).unwrap();
        registry.register(step::<E, D>("e_to_d", || D)).unwrap();
        registry
    }

    fn executed_route(resolved: &ResolvedTransformer) -> Vec<String> {
        let mut ctx = TransformContext::new();
        resolved.apply(AnyValue::new(A), &mut ctx).unwrap();
        ctx.get::<Vec<String>>("route").cloned().unwrap_or_default()
    }

    #[test]
    fn test_single_edge_resolves_to_that_transformer() {
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("a_to_b", || B)).unwrap();

        let resolver = Resolver::new(&registry);
        let resolved = resolver
            .resolve(TypeToken::of::<A>(), TypeToken::of::<B>(), &ResolveOptions::new())
            .unwrap();
        assert_eq!(resolved.hops(), 1);
        assert!(matches!(resolved, ResolvedTransformer::Unit(ref t) if t.name() == "a_to_b"));
    }

    #[test]
    fn test_missing_edge_without_derivation_is_no_transformer() {
        let registry = diamond_registry();
        let resolver = Resolver::new(&registry);

        let err = resolver
            .resolve(TypeToken::of::<A>(), TypeToken::of::<D>(), &ResolveOptions::new())
            .unwrap_err();
        assert!(matches!(err, TransformError::NoTransformer { .. }));
    }

    #[test]
    fn test_derivation_finds_a_minimum_length_route() {
        let registry = diamond_registry();
        let resolver = Resolver::new(&registry);

        let resolved = resolver
            .resolve(
                TypeToken::of::<A>(),
                TypeToken::of::<D>(),
                &ResolveOptions::new().deriving(),
            )
            .unwrap();

        // Two equal-length routes exist; which one wins is unspecified, but
        // it must be one of them, three hops long.
        assert_eq!(resolved.hops(), 3);
        let route = executed_route(&resolved);
        assert_eq!(route[0], "a_to_b");
        assert!(route == ["a_to_b", "b_to_c", "c_to_d"] || route == ["a_to_b", "b_to_e", "e_to_d"]);
    }

    #[test]
    fn test_direct_edge_preferred_over_derivation() {
        let mut registry = diamond_registry();
        registry.register(step::<A, D>("a_to_d", || D)).unwrap();

        let resolver = Resolver::new(&registry);
        let resolved = resolver
            .resolve(
                TypeToken::of::<A>(),
                TypeToken::of::<D>(),
                &ResolveOptions::new().deriving(),
            )
            .unwrap();
        assert_eq!(resolved.hops(), 1);
    }

    #[test]
    fn test_unregistered_types_fail_without_panicking() {
        let registry = diamond_registry();
        let resolver = Resolver::new(&registry);

        let err = resolver
            .resolve(
                TypeToken::of::<String>(),
                TypeToken::of::<u32>(),
                &ResolveOptions::new(),
            )
            .unwrap_err();
        assert!(matches!(err, TransformError::NoTransformer { .. }));

        let err = resolver
            .resolve(
                TypeToken::of::<String>(),
                TypeToken::of::<u32>(),
                &ResolveOptions::new().deriving(),
            )
            .unwrap_err();
        assert!(matches!(err, TransformError::NoPath { .. }));
    }

    #[test]
    fn test_derivation_with_no_route_is_no_path() {
        let registry = diamond_registry();
        // D has no outgoing edges, so D -> A cannot be derived.
        let resolver = Resolver::new(&registry);
        let err = resolver
            .resolve(
                TypeToken::of::<D>(),
                TypeToken::of::<A>(),
                &ResolveOptions::new().deriving(),
            )
            .unwrap_err();
        assert!(matches!(err, TransformError::NoPath { .. }));
    }

    #[test]
    fn test_ambiguous_edge_lists_all_candidates() {
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("first", || B)).unwrap();
        registry.register(step::<A, B>("second", || B)).unwrap();

        let resolver = Resolver::new(&registry);
        let err = resolver
            .resolve(TypeToken::of::<A>(), TypeToken::of::<B>(), &ResolveOptions::new())
            .unwrap_err();
        match err {
            TransformError::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["first", "second"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_preferred_name_beats_default() {
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("fallback", || B).as_default()).unwrap();
        registry.register(step::<A, B>("preferred", || B)).unwrap();

        let resolver = Resolver::new(&registry);
        let resolved = resolver
            .resolve(
                TypeToken::of::<A>(),
                TypeToken::of::<B>(),
                &ResolveOptions::new().with_name("preferred"),
            )
            .unwrap();
        assert!(matches!(resolved, ResolvedTransformer::Unit(ref t) if t.name() == "preferred"));
    }

    #[test]
    fn test_first_matching_preferred_name_wins() {
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("one", || B)).unwrap();
        registry.register(step::<A, B>("two", || B)).unwrap();

        let resolver = Resolver::new(&registry);
        let options = ResolveOptions::new()
            .with_name("missing")
            .with_name("two")
            .with_name("one");
        let resolved = resolver
            .resolve(TypeToken::of::<A>(), TypeToken::of::<B>(), &options)
            .unwrap();
        assert!(matches!(resolved, ResolvedTransformer::Unit(ref t) if t.name() == "two"));
    }

    #[test]
    fn test_unmatched_names_fall_back_to_default() {
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("fallback", || B).as_default()).unwrap();
        registry.register(step::<A, B>("other", || B)).unwrap();

        let resolver = Resolver::new(&registry);
        let resolved = resolver
            .resolve(
                TypeToken::of::<A>(),
                TypeToken::of::<B>(),
                &ResolveOptions::new().with_name("missing"),
            )
            .unwrap();
        assert!(matches!(resolved, ResolvedTransformer::Unit(ref t) if t.name() == "fallback"));
    }

    #[test]
    fn test_ambiguous_edge_does_not_fall_back_to_derivation() {
        let mut registry = TransformerRegistry::new();
        registry.register(step::<A, B>("first", || B)).unwrap();
        registry.register(step::<A, B>("second", || B)).unwrap();
        // A longer unambiguous route around the ambiguous edge.
        registry.register(step::<A, C>("a_to_c", || C)).unwrap();
        registry.register(step::<C, B>("c_to_b", || B)).unwrap();

        let resolver = Resolver::new(&registry);
        let err = resolver
            .resolve(
                TypeToken::of::<A>(),
                TypeToken::of::<B>(),
                &ResolveOptions::new().deriving(),
            )
            .unwrap_err();
        assert!(matches!(err, TransformError::Ambiguous { .. }));
    }

    #[test]
    fn test_explicit_path_resolves_each_pair() {
        let registry = diamond_registry();
        let resolver = Resolver::new(&registry);

        let path = [
            TypeToken::of::<A>(),
            TypeToken::of::<B>(),
            TypeToken::of::<E>(),
            TypeToken::of::<D>(),
        ];
        let resolved = resolver.resolve_path(&path, &ResolveOptions::new()).unwrap();
        assert_eq!(resolved.hops(), 3);
        assert_eq!(executed_route(&resolved), vec!["a_to_b", "b_to_e", "e_to_d"]);
    }

    #[test]
    fn test_explicit_path_fails_fast_naming_the_missing_hop() {
        let registry = diamond_registry();
        let resolver = Resolver::new(&registry);

        // C -> E is not registered, even though C and E are both vertices.
        let path = [
            TypeToken::of::<A>(),
            TypeToken::of::<B>(),
            TypeToken::of::<C>(),
            TypeToken::of::<E>(),
            TypeToken::of::<D>(),
        ];
        let err = resolver.resolve_path(&path, &ResolveOptions::new()).unwrap_err();
        match err {
            TransformError::NoTransformer { from, to } => {
                assert_eq!(from, TypeToken::of::<C>());
                assert_eq!(to, TypeToken::of::<E>());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_concurrent_resolutions_share_a_finished_registry() {
        let registry = diamond_registry();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let resolver = Resolver::new(&registry);
                    let resolved = resolver
                        .resolve(
                            TypeToken::of::<A>(),
                            TypeToken::of::<D>(),
                            &ResolveOptions::new().deriving(),
                        )
                        .unwrap();
                    assert_eq!(resolved.hops(), 3);
                });
            }
        });
    }

    #[test]
    fn test_explicit_path_requires_two_types() {
        let registry = diamond_registry();
        let resolver = Resolver::new(&registry);
        let err = resolver
            .resolve_path(&[TypeToken::of::<A>()], &ResolveOptions::new())
            .unwrap_err();
        assert!(matches!(err, TransformError::Configuration(_)));
    }
}
