//! Error types for the libsvm binding layer

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SvmError {
    /// libsvm rejected the parameter/problem combination before training.
    /// Carries the diagnostic text reported by `svm_check_parameter`.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot read model from {path:?}")]
    ModelRead { path: PathBuf },

    #[error("cannot write model to {path:?}")]
    ModelWrite { path: PathBuf },

    /// The path cannot be passed across the C boundary (non-UTF-8, or
    /// contains an interior NUL byte).
    #[error("path {path:?} cannot be represented as a C string")]
    InvalidPath { path: PathBuf },

    #[error("model was not trained to do probability estimates")]
    ProbabilityUnsupported,

    /// Feature indices are 1-based; libsvm reserves smaller values.
    #[error("feature index {0} out of range: indices start at 1")]
    FeatureIndexOutOfRange(i32),

    /// A feature vector with a repeated index has no meaning to libsvm.
    #[error("duplicate feature index {0}")]
    DuplicateFeatureIndex(i32),

    /// A buffer handed to libsvm could not be allocated. The numerical
    /// engine cannot run without it, so callers are not expected to
    /// recover beyond failing the operation.
    #[error("allocation failed: {0}")]
    ResourceExhausted(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, SvmError>;
