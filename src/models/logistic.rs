use ndarray::{Array1, ArrayView1};

use crate::data::Dataset;
use crate::error::EnsembleError;
use crate::models::classifier_trait::WeakClassifier;

/// Logistic regression trained by batch gradient descent on binary
/// cross-entropy loss. Doubles as the default weak learner and as the link
/// function fitted over path scores.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    weights: Option<Array1<f32>>,
    intercept: f32,
    learning_rate: f32,
    max_iter: usize,
    tol: f32,
}

impl LogisticClassifier {
    pub fn new(learning_rate: f32, max_iter: usize, tol: f32) -> Self {
        LogisticClassifier {
            weights: None,
            intercept: 0.0,
            learning_rate,
            max_iter,
            tol,
        }
    }

    fn sigmoid(z: f32) -> f32 {
        1.0 / (1.0 + (-z).exp())
    }

    fn decision(&self, row: ArrayView1<'_, f32>) -> f32 {
        let mut z = self.intercept;
        if let Some(w) = &self.weights {
            for (j, wj) in w.iter().enumerate() {
                z += wj * row[j];
            }
        }
        z
    }
}

impl WeakClassifier for LogisticClassifier {
    fn fit(&mut self, data: &Dataset) -> Result<(), EnsembleError> {
        let n = data.n_samples();
        if n == 0 {
            return Err(EnsembleError::Training(
                "cannot fit on an empty dataset".to_string(),
            ));
        }
        let n_features = data.n_features();
        let mut weights = Array1::<f32>::zeros(n_features);
        let mut intercept = 0.0f32;

        for _ in 0..self.max_iter {
            let mut grad_w = vec![0.0f32; n_features];
            let mut grad_b = 0.0f32;

            for i in 0..n {
                let row = data.row(i);
                let mut z = intercept;
                for j in 0..n_features {
                    z += weights[j] * row[j];
                }
                let error = Self::sigmoid(z) - data.y[i] as f32;
                grad_b += error;
                for (j, g) in grad_w.iter_mut().enumerate() {
                    *g += error * row[j];
                }
            }

            let scale = 1.0 / n as f32;
            grad_b *= scale;
            for g in grad_w.iter_mut() {
                *g *= scale;
            }

            intercept -= self.learning_rate * grad_b;
            for j in 0..n_features {
                weights[j] -= self.learning_rate * grad_w[j];
            }

            if grad_b.abs() < self.tol && grad_w.iter().all(|g| g.abs() < self.tol) {
                break;
            }
        }

        self.weights = Some(weights);
        self.intercept = intercept;
        Ok(())
    }

    fn predict_proba(&self, row: ArrayView1<'_, f32>) -> Vec<f32> {
        let p1 = Self::sigmoid(self.decision(row));
        vec![1.0 - p1, p1]
    }

    fn name(&self) -> &str {
        "logistic"
    }
}
