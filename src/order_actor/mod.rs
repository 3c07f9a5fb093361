//! Order storage rules and order-level errors.

pub mod entity;
pub mod error;

pub use error::*;
