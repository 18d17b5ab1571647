//! Training parameter configuration
//!
//! Pure data: each variant maps 1:1 onto fields of libsvm's
//! `svm_parameter` record. No validation happens here; libsvm checks
//! the combination against the training data when
//! [`Model::train`](crate::Model::train) is called.

use std::os::raw::c_int;
use std::ptr;

use libsvm_sys as ffi;

/// SVM formulation to train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvmType {
    /// C-support vector classification.
    CSvc { cost: f64 },
    /// Nu-support vector classification.
    NuSvc { cost: f64, nu: f64 },
    /// One-class SVM for distribution estimation.
    OneClass { nu: f64 },
    /// Epsilon-support vector regression.
    EpsilonSvr { cost: f64, epsilon: f64 },
    /// Nu-support vector regression.
    NuSvr { cost: f64, nu: f64 },
}

/// Kernel function used during training and prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// K(x, y) = x'y
    Linear,
    /// K(x, y) = (gamma * x'y + coef0)^degree
    Polynomial { gamma: f64, coef0: f64, degree: i32 },
    /// K(x, y) = exp(-gamma * ||x - y||^2)
    Rbf { gamma: f64 },
    /// K(x, y) = tanh(gamma * x'y + coef0)
    Sigmoid { gamma: f64, coef0: f64 },
}

/// Parameters for training an SVM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub svm_type: SvmType,
    pub kernel: Kernel,
    /// Kernel cache size in MB.
    pub cache_size: f64,
    /// Stopping criterion for the optimizer.
    pub epsilon: f64,
    /// Apply the shrinking heuristic.
    pub shrinking: bool,
    /// Train with probability estimates.
    pub probability: bool,
}

impl Parameters {
    /// Parameters for the given formulation and kernel, with a 1 MB
    /// kernel cache, epsilon = 0.001, and shrinking and probability
    /// estimates disabled.
    pub fn new(svm_type: SvmType, kernel: Kernel) -> Self {
        Self {
            svm_type,
            kernel,
            cache_size: 1.0,
            epsilon: 0.001,
            shrinking: false,
            probability: false,
        }
    }

    /// Set the kernel cache size in MB.
    pub fn with_cache_size(mut self, cache_size: f64) -> Self {
        self.cache_size = cache_size;
        self
    }

    /// Set the stopping criterion.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enable or disable the shrinking heuristic.
    pub fn with_shrinking(mut self, shrinking: bool) -> Self {
        self.shrinking = shrinking;
        self
    }

    /// Enable or disable probability estimates. Models trained without
    /// them reject [`predict_probability`](crate::Model::predict_probability).
    pub fn with_probability(mut self, probability: bool) -> Self {
        self.probability = probability;
        self
    }

    /// Translate into libsvm's flat configuration record. The weight
    /// table is left empty; libsvm then uses a penalty of `cost` for
    /// every class.
    pub(crate) fn to_native(self) -> ffi::svm_parameter {
        let (svm_type, cost, nu, p) = match self.svm_type {
            SvmType::CSvc { cost } => (ffi::C_SVC, cost, 0.0, 0.0),
            SvmType::NuSvc { cost, nu } => (ffi::NU_SVC, cost, nu, 0.0),
            SvmType::OneClass { nu } => (ffi::ONE_CLASS, 0.0, nu, 0.0),
            SvmType::EpsilonSvr { cost, epsilon } => (ffi::EPSILON_SVR, cost, 0.0, epsilon),
            SvmType::NuSvr { cost, nu } => (ffi::NU_SVR, cost, nu, 0.0),
        };

        let (kernel_type, gamma, coef0, degree) = match self.kernel {
            Kernel::Linear => (ffi::LINEAR, 0.0, 0.0, 0),
            Kernel::Polynomial {
                gamma,
                coef0,
                degree,
            } => (ffi::POLY, gamma, coef0, degree),
            Kernel::Rbf { gamma } => (ffi::RBF, gamma, 0.0, 0),
            Kernel::Sigmoid { gamma, coef0 } => (ffi::SIGMOID, gamma, coef0, 0),
        };

        ffi::svm_parameter {
            svm_type: svm_type as c_int,
            kernel_type: kernel_type as c_int,
            degree: degree as c_int,
            gamma,
            coef0,
            cache_size: self.cache_size,
            eps: self.epsilon,
            C: cost,
            nr_weight: 0,
            weight_label: ptr::null_mut(),
            weight: ptr::null_mut(),
            nu,
            p,
            shrinking: c_int::from(self.shrinking),
            probability: c_int::from(self.probability),
        }
    }
}

impl Default for Parameters {
    /// Default training parameters: C-SVC with a constraint violation
    /// cost of 1 and a linear kernel.
    fn default() -> Self {
        Self::new(SvmType::CSvc { cost: 1.0 }, Kernel::Linear)
    }
}
