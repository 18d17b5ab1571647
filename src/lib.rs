//! Safe Rust bindings for libsvm
//!
//! This crate trains and applies Support Vector Machines (SVMs)
//! through the libsvm C library, which is bundled and compiled by the
//! `libsvm-sys` crate. It supports C-SVC, nu-SVC, epsilon-SVR, nu-SVR,
//! and one-class SVMs with linear, polynomial, RBF, and sigmoid
//! kernels. Trained models can be saved to and loaded from disk, to
//! avoid the (potentially) costly training process.
//!
//! A model is trained from a problem: a set of training instances,
//! each carrying a class label and a sparse feature vector. Consider a
//! humble sentiment-analysis corpus of two sentences, "A beautiful
//! album" (positive, class 0) and "A crappy ugly album" (negative,
//! class 1). Numbering the words a: 1, beautiful: 2, album: 3,
//! crappy: 4, ugly: 5 and using booleans as feature values gives the
//! dense vectors `[1, 1, 1, 0, 0]` and `[1, 0, 1, 1, 1]`:
//!
//! ```
//! use std::sync::Arc;
//! use svmbind::{from_dense_vector, Model, Parameters, Problem, TrainingInstance};
//!
//! # fn main() -> Result<(), svmbind::SvmError> {
//! let mut problem = Problem::new();
//! problem.add(&TrainingInstance::new(
//!     0.0,
//!     from_dense_vector(&[1.0, 1.0, 1.0, 0.0, 0.0]),
//! ))?;
//! problem.add(&TrainingInstance::new(
//!     1.0,
//!     from_dense_vector(&[1.0, 0.0, 1.0, 1.0, 1.0]),
//! ))?;
//!
//! // Default parameters train a C-SVC with a linear kernel. The model
//! // shares ownership of the problem, which libsvm keeps pointers into.
//! let model = Model::train(&Parameters::default(), Arc::new(problem))?;
//!
//! // "This is a beautiful book" maps onto the training features as
//! // [1, 1, 0, 0, 0], and comes out positive.
//! let label = model.predict(&from_dense_vector(&[1.0, 1.0, 0.0, 0.0, 0.0]))?;
//! assert_eq!(label, 0.0);
//! # Ok(())
//! # }
//! ```
//!
//! libsvm's optimizer progress output is forwarded to the [`log`]
//! facade under the `libsvm` target instead of being printed to
//! stdout.

pub mod core;
pub mod model;
pub mod params;
pub mod problem;

mod alloc;

// Re-export main types for convenience
pub use crate::core::error::{Result, SvmError};
pub use crate::core::types::{from_dense_vector, FeatureValue, FeatureVector, TrainingInstance};
pub use crate::model::Model;
pub use crate::params::{Kernel, Parameters, SvmType};
pub use crate::problem::Problem;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
