//! Core types for the libsvm binding layer

pub mod error;
pub mod types;

pub use self::error::*;
pub use self::types::*;
