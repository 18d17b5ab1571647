//! Core type definitions for the binding layer

/// A feature and its value. The index uniquely identifies the feature
/// dimension and is 1-based, following libsvm's convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureValue {
    pub index: i32,
    pub value: f64,
}

impl FeatureValue {
    pub fn new(index: i32, value: f64) -> Self {
        Self { index, value }
    }
}

/// Sparse feature vector: the list of non-zero features. Zero-valued
/// dimensions are normally omitted, but nothing breaks if they are kept.
pub type FeatureVector = Vec<FeatureValue>;

/// Convert a dense vector to the sparse representation used by this
/// crate. Features are numbered `1..=n`, so the following are equal:
///
/// ```
/// use svmbind::{from_dense_vector, FeatureValue};
///
/// let sparse = from_dense_vector(&[0.2, 0.1, 0.3, 0.6]);
/// assert_eq!(
///     sparse,
///     vec![
///         FeatureValue::new(1, 0.2),
///         FeatureValue::new(2, 0.1),
///         FeatureValue::new(3, 0.3),
///         FeatureValue::new(4, 0.6),
///     ]
/// );
/// ```
pub fn from_dense_vector(dense: &[f64]) -> FeatureVector {
    dense
        .iter()
        .enumerate()
        .map(|(idx, &value)| FeatureValue::new(idx as i32 + 1, value))
        .collect()
}

/// Training instance: a label and its feature vector. In classification
/// the label is an integral class id; in regression it is the target
/// value. One-class training ignores the label but still requires one.
#[derive(Debug, Clone)]
pub struct TrainingInstance {
    pub label: f64,
    pub features: FeatureVector,
}

impl TrainingInstance {
    pub fn new(label: f64, features: FeatureVector) -> Self {
        Self { label, features }
    }
}
