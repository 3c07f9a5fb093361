//! Category storage rules and category-level errors.

pub mod entity;
pub mod error;

pub use error::*;
