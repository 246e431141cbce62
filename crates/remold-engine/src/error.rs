//! Engine error types.

use remold_core::BoxedError;
use remold_core::token::TypeToken;
use thiserror::Error;

/// Result type for registration (setup phase) operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Result type for resolution and execution operations.
pub type TransformResult<T> = std::result::Result<T, TransformError>;

/// Errors raised while registering transformers.
///
/// Registration conflicts are fatal to the setup phase: the registry never
/// silently picks one of two colliding transformers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two transformers on one edge both claim to be the default.
    #[error("multiple default transformers from {from} to {to}: `{existing}` and `{incoming}`")]
    DuplicateDefault {
        /// Source type of the edge.
        from: TypeToken,
        /// Target type of the edge.
        to: TypeToken,
        /// Name of the already registered default.
        existing: String,
        /// Name of the rejected registration.
        incoming: String,
    },

    /// Two transformers on one edge share a name.
    #[error("multiple transformers from {from} to {to} share the name `{name}`")]
    DuplicateName {
        /// Source type of the edge.
        from: TypeToken,
        /// Target type of the edge.
        to: TypeToken,
        /// The colliding name.
        name: String,
    },
}

/// Errors raised while resolving or executing a transformation request.
///
/// All variants are fatal to the request: the engine never retries, never
/// partially applies a chain, and never falls back to another resolution
/// strategy once one has failed.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The request configuration is self-contradictory.
    #[error("invalid transformation request: {0}")]
    Configuration(String),

    /// No transformer is registered for the requested edge.
    #[error("no transformer registered from {from} to {to}")]
    NoTransformer {
        /// Requested source type.
        from: TypeToken,
        /// Requested target type.
        to: TypeToken,
    },

    /// Multiple transformers match an edge and neither a preferred name nor
    /// a unique default picks one.
    #[error(
        "multiple transformers from {from} to {to} and no way to choose; candidates: {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        /// Requested source type.
        from: TypeToken,
        /// Requested target type.
        to: TypeToken,
        /// Names of every registered candidate for the edge.
        candidates: Vec<String>,
    },

    /// Derivation was requested but the graph holds no route.
    #[error("no transformation path from {from} to {to}")]
    NoPath {
        /// Requested source type.
        from: TypeToken,
        /// Requested target type.
        to: TypeToken,
    },

    /// A transformer failed during invocation.
    #[error("transformer `{name}` failed at hop {hop} ({from} -> {to})")]
    Execution {
        /// 1-based position of the failing hop within the executed chain.
        hop: usize,
        /// Source type of the failing hop.
        from: TypeToken,
        /// Target type of the failing hop.
        to: TypeToken,
        /// Name of the failing transformer.
        name: String,
        /// The underlying, uninterpreted cause.
        #[source]
        cause: BoxedError,
    },

    /// A value or context contract was violated.
    #[error(transparent)]
    Value(#[from] remold_core::Error),
}
