use ndarray::ArrayView1;

use crate::data::Dataset;
use crate::error::EnsembleError;

/// Input domain a classifier accepts. The ensemble delegates to its weak
/// learner's capabilities, since it accepts the same inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub numeric_attributes: bool,
    pub binary_class: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            numeric_attributes: true,
            binary_class: true,
        }
    }
}

/// Capability surface of a weak classifier. The graph builder only depends on
/// this contract; concrete learners live next to it in the `models` module and
/// are constructed through the factory.
pub trait WeakClassifier: Send + Sync {
    /// Fit the model on a (possibly resampled) training set.
    fn fit(&mut self, data: &Dataset) -> Result<(), EnsembleError>;

    /// Per-class probabilities in label order `[p(0), p(1)]`.
    fn predict_proba(&self, row: ArrayView1<'_, f32>) -> Vec<f32>;

    /// Predicted label, 0 or 1.
    fn predict(&self, row: ArrayView1<'_, f32>) -> i32 {
        let proba = self.predict_proba(row);
        i32::from(proba[1] >= proba[0])
    }

    /// Fraction of `data` classified correctly.
    fn evaluate(&self, data: &Dataset) -> f64 {
        if data.n_samples() == 0 {
            return 0.0;
        }
        let right = (0..data.n_samples())
            .filter(|&i| self.predict(data.row(i)) == data.y[i])
            .count();
        right as f64 / data.n_samples() as f64
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Human readable name for the model.
    fn name(&self) -> &str {
        "classifier"
    }
}
