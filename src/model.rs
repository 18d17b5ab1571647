//! Model lifecycle: training, loading, prediction, persistence
//!
//! A [`Model`] owns libsvm's trained state. When trained (not loaded)
//! it also holds an `Arc` to the [`Problem`] that produced it, because
//! libsvm keeps support-vector pointers into the problem's node arrays
//! rather than copying them. The native handle is released in `Drop`,
//! before the problem reference goes away.

use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::sync::{Arc, Once, OnceLock};

use libsvm_sys as ffi;
use log::debug;

use crate::alloc;
use crate::core::{FeatureValue, Result, SvmError};
use crate::params::Parameters;
use crate::problem::{native_nodes, Problem};

static REDIRECT_OUTPUT: Once = Once::new();

/// libsvm reports optimizer progress through a print callback that
/// defaults to stdout. Forward it to the `log` facade instead.
unsafe extern "C" fn log_solver_output(msg: *const c_char) {
    let text = CStr::from_ptr(msg).to_string_lossy();
    let text = text.trim();
    if !text.is_empty() {
        log::debug!(target: "libsvm", "{text}");
    }
}

fn redirect_solver_output() {
    REDIRECT_OUTPUT.call_once(|| unsafe {
        ffi::svm_set_print_string_function(Some(log_solver_output));
    });
}

fn path_to_cstring(path: &Path) -> Result<CString> {
    path.to_str()
        .and_then(|s| CString::new(s).ok())
        .ok_or_else(|| SvmError::InvalidPath {
            path: path.to_path_buf(),
        })
}

/// A trained SVM. Created by [`Model::train`] or [`Model::load`],
/// immutable afterwards, and usable for prediction until dropped.
#[derive(Debug)]
pub struct Model {
    model: *mut ffi::svm_model,
    /// A trained model keeps its source problem alive; a loaded model
    /// has no associated problem (libsvm owns the support vectors it
    /// read from disk).
    problem: Option<Arc<Problem>>,
    /// Class-label ordering as reported by libsvm, fetched once on
    /// first use. A model never changes after construction, so the
    /// cache is valid for its entire lifetime.
    labels: OnceLock<Vec<i32>>,
}

// The handle is immutable after construction and libsvm's predict
// entry points only read the trained state, with all output written
// to caller-provided buffers that are per-call here.
unsafe impl Send for Model {}
unsafe impl Sync for Model {}

impl Model {
    /// Train an SVM on `problem` with the given parameters.
    ///
    /// The parameters are validated by libsvm against the problem
    /// first; a rejected combination returns
    /// [`SvmError::InvalidParameter`] carrying libsvm's diagnostic and
    /// no training takes place. Training itself is synchronous and can
    /// be long-running; there is no way to interrupt it.
    ///
    /// The model shares ownership of the problem, so the training data
    /// outlives the model no matter when the caller drops its own
    /// handle.
    pub fn train(params: &Parameters, problem: Arc<Problem>) -> Result<Model> {
        redirect_solver_output();

        let native_params = params.to_native();
        let view = problem.native_view()?;

        let diagnostic = unsafe { ffi::svm_check_parameter(view.as_ptr(), &native_params) };
        if !diagnostic.is_null() {
            let msg = unsafe { CStr::from_ptr(diagnostic) }
                .to_string_lossy()
                .into_owned();
            return Err(SvmError::InvalidParameter(msg));
        }

        debug!(
            "training {:?} with {:?} on {} instances",
            params.svm_type,
            params.kernel,
            problem.len()
        );
        let model = unsafe { ffi::svm_train(view.as_ptr(), &native_params) };
        debug!("training finished");

        drop(view);
        Ok(Model {
            model,
            problem: Some(problem),
            labels: OnceLock::new(),
        })
    }

    /// Load a previously saved model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Model> {
        redirect_solver_output();

        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;
        let model = unsafe { ffi::svm_load_model(c_path.as_ptr()) };
        if model.is_null() {
            return Err(SvmError::ModelRead {
                path: path.to_path_buf(),
            });
        }

        debug!("loaded model from {path:?}");
        Ok(Model {
            model,
            problem: None,
            labels: OnceLock::new(),
        })
    }

    /// Save the model to a file, in libsvm's own format. The file
    /// round-trips through [`Model::load`] without altering predictive
    /// behavior.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let c_path = path_to_cstring(path)?;
        if unsafe { ffi::svm_save_model(c_path.as_ptr(), self.model) } != 0 {
            return Err(SvmError::ModelWrite {
                path: path.to_path_buf(),
            });
        }
        debug!("saved model to {path:?}");
        Ok(())
    }

    /// Predict the label of an instance. For classifiers this is a
    /// class id, for regressors the estimated target value, and for
    /// one-class models +1 or -1.
    pub fn predict(&self, features: &[FeatureValue]) -> Result<f64> {
        let nodes = native_nodes(features)?;
        Ok(unsafe { ffi::svm_predict(self.model, nodes.as_ptr()) })
    }

    /// Predict the label of an instance along with per-class
    /// probability estimates, keyed by class label.
    ///
    /// Fails with [`SvmError::ProbabilityUnsupported`] unless the model
    /// was trained with [`Parameters::with_probability`] enabled. For
    /// SVM types without meaningful per-class estimates libsvm defines
    /// the (degenerate) buffer contents; they are passed through
    /// unaltered.
    pub fn predict_probability(
        &self,
        features: &[FeatureValue],
    ) -> Result<(f64, HashMap<i32, f64>)> {
        if !self.probability_capable() {
            return Err(SvmError::ProbabilityUnsupported);
        }

        let nodes = native_nodes(features)?;
        let mut estimates = alloc::try_buffer::<f64>(self.class_count())?;
        let label = unsafe {
            ffi::svm_predict_probability(self.model, nodes.as_ptr(), estimates.as_mut_ptr())
        };

        let labels = self.class_labels()?;
        let probabilities = labels.iter().copied().zip(estimates).collect();
        Ok((label, probabilities))
    }

    /// Predict the label of an instance along with the raw decision
    /// values.
    ///
    /// One-class and regression models produce a single value. A
    /// classifier over `n` classes produces `n * (n - 1) / 2` pairwise
    /// values, ordered (1 vs 2), (1 vs 3), ..., (2 vs 3), ... over the
    /// [`labels`](Model::labels) ordering.
    pub fn predict_decision_values(&self, features: &[FeatureValue]) -> Result<(f64, Vec<f64>)> {
        let nodes = native_nodes(features)?;

        let len = match unsafe { ffi::svm_get_svm_type(self.model) } as u32 {
            ffi::ONE_CLASS | ffi::EPSILON_SVR | ffi::NU_SVR => 1,
            _ => {
                let n = self.class_count();
                n * (n - 1) / 2
            }
        };
        let mut values = alloc::try_buffer::<f64>(len)?;
        let label =
            unsafe { ffi::svm_predict_values(self.model, nodes.as_ptr(), values.as_mut_ptr()) };
        Ok((label, values))
    }

    /// Class labels in libsvm's ordering. Regression and one-class
    /// models have no class labels and report zeros.
    pub fn labels(&self) -> Result<Vec<i32>> {
        Ok(self.class_labels()?.to_vec())
    }

    /// Number of classes. Two for regression and one-class models, by
    /// libsvm convention.
    pub fn class_count(&self) -> usize {
        unsafe { ffi::svm_get_nr_class(self.model) as usize }
    }

    /// Whether the model carries the information needed for
    /// probability estimates.
    pub fn probability_capable(&self) -> bool {
        unsafe { ffi::svm_check_probability_model(self.model) != 0 }
    }

    /// Whether the model was trained in this process. A trained model
    /// shares ownership of its source problem; a model loaded from
    /// disk has none.
    pub fn is_trained(&self) -> bool {
        self.problem.is_some()
    }

    fn class_labels(&self) -> Result<&[i32]> {
        if let Some(labels) = self.labels.get() {
            return Ok(labels);
        }

        let mut buf = alloc::try_buffer::<c_int>(self.class_count())?;
        unsafe { ffi::svm_get_labels(self.model, buf.as_mut_ptr()) };
        Ok(self.labels.get_or_init(|| buf))
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        // The native handle must go first: a trained model's support
        // vectors point into problem-owned node arrays, and the
        // problem Arc is released when the fields drop afterwards.
        unsafe { ffi::svm_free_and_destroy_model(&mut self.model) };
    }
}
