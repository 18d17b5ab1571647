//! Training problem construction and feature-vector marshaling
//!
//! A [`Problem`] owns the training set in the sparse node format libsvm
//! consumes: one sentinel-terminated node array per instance, plus the
//! label vector. The node arrays live on the heap at stable addresses,
//! because a model trained from the problem keeps pointers into them
//! for its support vectors. That dependency is what forces a `Problem`
//! to outlive every [`Model`](crate::Model) trained from it; see
//! [`Model::train`](crate::Model::train).

use std::marker::PhantomData;
use std::os::raw::c_int;

use libsvm_sys as ffi;

use crate::alloc;
use crate::core::{FeatureValue, Result, SvmError, TrainingInstance};

/// Marshal a feature vector into a sentinel-terminated libsvm node
/// array. The caller's slice is never touched: a private copy is
/// stable-sorted by ascending index, then checked for out-of-range and
/// duplicate indices, both of which libsvm would silently misread.
///
/// Built fresh for every call that crosses the boundary and released
/// by `Drop` on every exit path.
pub(crate) fn native_nodes(features: &[FeatureValue]) -> Result<Vec<ffi::svm_node>> {
    let mut nodes = alloc::try_with_capacity::<ffi::svm_node>(features.len() + 1)?;
    nodes.extend(features.iter().map(|fv| ffi::svm_node {
        index: fv.index as c_int,
        value: fv.value,
    }));
    nodes.sort_by_key(|node| node.index);

    if let Some(first) = nodes.first() {
        if first.index < 1 {
            return Err(SvmError::FeatureIndexOutOfRange(first.index));
        }
    }
    if let Some(dup) = nodes.windows(2).find(|w| w[0].index == w[1].index) {
        return Err(SvmError::DuplicateFeatureIndex(dup[0].index));
    }

    // Terminator
    nodes.push(ffi::svm_node {
        index: -1,
        value: 0.0,
    });
    Ok(nodes)
}

/// A set of training instances and their labels, in libsvm's native
/// representation.
///
/// The collection is append-only. Once a model has been trained from
/// it the problem is conceptually frozen; sharing it through an
/// [`Arc`](std::sync::Arc) enforces that, since `add` needs exclusive
/// access.
#[derive(Debug, Default)]
pub struct Problem {
    labels: Vec<f64>,
    instances: Vec<Box<[ffi::svm_node]>>,
}

impl Problem {
    /// Create an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a training instance.
    ///
    /// The instance's feature vector is copied and sorted internally;
    /// the caller's data is not modified. Fails if the vector contains
    /// an index below 1 or a duplicate index, or if storage for the
    /// copy cannot be allocated.
    pub fn add(&mut self, instance: &TrainingInstance) -> Result<()> {
        let nodes = native_nodes(&instance.features)?;

        self.labels.try_reserve(1)?;
        self.instances.try_reserve(1)?;
        self.labels.push(instance.label);
        self.instances.push(nodes.into_boxed_slice());
        Ok(())
    }

    /// Number of training instances added so far.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Materialize the `svm_problem` record for a training call. The
    /// view borrows the problem, so the pointer table it carries stays
    /// valid for as long as the view is alive.
    pub(crate) fn native_view(&self) -> Result<NativeProblem<'_>> {
        let mut x = alloc::try_with_capacity::<*mut ffi::svm_node>(self.instances.len())?;
        x.extend(
            self.instances
                .iter()
                .map(|nodes| nodes.as_ptr() as *mut ffi::svm_node),
        );

        // libsvm only reads through y and x; the casts drop const so
        // the record matches the C declaration.
        let raw = ffi::svm_problem {
            l: self.labels.len() as c_int,
            y: self.labels.as_ptr() as *mut f64,
            x: x.as_mut_ptr(),
        };

        Ok(NativeProblem {
            _x: x,
            raw,
            _problem: PhantomData,
        })
    }
}

/// Borrow-scoped `svm_problem` record. Holds the node-pointer table
/// backing `raw.x` alive for the duration of the borrow.
pub(crate) struct NativeProblem<'a> {
    _x: Vec<*mut ffi::svm_node>,
    raw: ffi::svm_problem,
    _problem: PhantomData<&'a Problem>,
}

impl NativeProblem<'_> {
    pub(crate) fn as_ptr(&self) -> *const ffi::svm_problem {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::from_dense_vector;

    #[test]
    fn test_native_nodes_appends_terminator() {
        let nodes = native_nodes(&from_dense_vector(&[0.5, 1.5])).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].index, 1);
        assert_eq!(nodes[1].index, 2);
        assert_eq!(nodes[1].value, 1.5);
        assert_eq!(nodes[2].index, -1);
    }

    #[test]
    fn test_native_nodes_sorts_by_index() {
        let features = vec![
            FeatureValue::new(3, 0.3),
            FeatureValue::new(1, 0.1),
            FeatureValue::new(2, 0.2),
        ];
        let nodes = native_nodes(&features).unwrap();
        assert_eq!(
            nodes.iter().map(|n| n.index).collect::<Vec<_>>(),
            vec![1, 2, 3, -1]
        );
        assert_eq!(nodes[0].value, 0.1);
        assert_eq!(nodes[2].value, 0.3);
    }

    #[test]
    fn test_native_nodes_empty_vector() {
        let nodes = native_nodes(&[]).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].index, -1);
    }

    #[test]
    fn test_native_nodes_rejects_duplicate_index() {
        let features = vec![FeatureValue::new(2, 0.1), FeatureValue::new(2, 0.2)];
        match native_nodes(&features) {
            Err(SvmError::DuplicateFeatureIndex(2)) => {}
            other => panic!("expected DuplicateFeatureIndex(2), got {other:?}"),
        }
    }

    #[test]
    fn test_native_nodes_rejects_zero_index() {
        let features = vec![FeatureValue::new(0, 0.1)];
        match native_nodes(&features) {
            Err(SvmError::FeatureIndexOutOfRange(0)) => {}
            other => panic!("expected FeatureIndexOutOfRange(0), got {other:?}"),
        }
    }

    #[test]
    fn test_add_does_not_mutate_input() {
        let features = vec![
            FeatureValue::new(4, 0.4),
            FeatureValue::new(1, 0.1),
            FeatureValue::new(3, 0.3),
        ];
        let instance = TrainingInstance::new(1.0, features.clone());

        let mut problem = Problem::new();
        problem.add(&instance).unwrap();

        assert_eq!(instance.features, features);
    }

    #[test]
    fn test_add_sorting_is_idempotent() {
        let sorted = TrainingInstance::new(
            0.0,
            vec![
                FeatureValue::new(1, 0.1),
                FeatureValue::new(2, 0.2),
                FeatureValue::new(3, 0.3),
            ],
        );
        let permuted = TrainingInstance::new(
            0.0,
            vec![
                FeatureValue::new(3, 0.3),
                FeatureValue::new(1, 0.1),
                FeatureValue::new(2, 0.2),
            ],
        );

        let mut a = Problem::new();
        let mut b = Problem::new();
        a.add(&sorted).unwrap();
        b.add(&permuted).unwrap();

        let nodes_a: Vec<_> = a.instances[0].iter().map(|n| (n.index, n.value)).collect();
        let nodes_b: Vec<_> = b.instances[0].iter().map(|n| (n.index, n.value)).collect();
        assert_eq!(nodes_a, nodes_b);
    }

    #[test]
    fn test_problem_len() {
        let mut problem = Problem::new();
        assert!(problem.is_empty());

        problem
            .add(&TrainingInstance::new(0.0, from_dense_vector(&[1.0])))
            .unwrap();
        problem
            .add(&TrainingInstance::new(1.0, from_dense_vector(&[2.0])))
            .unwrap();
        assert_eq!(problem.len(), 2);
        assert!(!problem.is_empty());
    }

    #[test]
    fn test_native_view_shape() {
        let mut problem = Problem::new();
        problem
            .add(&TrainingInstance::new(0.0, from_dense_vector(&[1.0, 0.0])))
            .unwrap();
        problem
            .add(&TrainingInstance::new(1.0, from_dense_vector(&[0.0, 1.0])))
            .unwrap();

        let view = problem.native_view().unwrap();
        let raw = unsafe { *view.as_ptr() };
        assert_eq!(raw.l, 2);
        assert!(!raw.y.is_null());
        assert!(!raw.x.is_null());
        assert_eq!(unsafe { *raw.y }, 0.0);
        assert_eq!(unsafe { (**raw.x).index }, 1);
    }
}
