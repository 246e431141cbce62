#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod binding;
pub mod context;
pub mod token;
pub mod value;

#[doc(hidden)]
pub mod prelude;

pub use error::{BoxedError, Error, Result};
