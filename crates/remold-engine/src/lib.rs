#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod graph;
pub mod registry;
pub mod request;
pub mod resolver;
pub mod transformer;

#[doc(hidden)]
pub mod prelude;

pub use error::{RegistryError, RegistryResult, TransformError, TransformResult};

/// Tracing target for engine operations.
pub const TRACING_TARGET: &str = "remold_engine";
