//! Product storage rules and product-level errors.

pub mod entity;
pub mod error;

pub use error::*;
