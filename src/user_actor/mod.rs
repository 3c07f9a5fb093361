//! User storage rules, sign-up validation and user-level errors.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::*;
