//! Labeled tabular dataset used for training and evaluation.
//!
//! Rows are instances, columns are numeric features; labels live in a
//! separate array. Binary classification is assumed: labels must be 0 or 1
//! for the weighted path sum to be meaningful.
use ndarray::{Array1, Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::EnsembleError;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f32>,
    pub y: Array1<i32>,
}

impl Dataset {
    /// Create a dataset, validating shape agreement and the binary label
    /// convention.
    pub fn new(x: Array2<f32>, y: Array1<i32>) -> Result<Self, EnsembleError> {
        if x.nrows() == 0 {
            return Err(EnsembleError::InvalidData(
                "dataset must contain at least one instance".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(EnsembleError::InvalidData(format!(
                "feature matrix has {} rows but {} labels were given",
                x.nrows(),
                y.len()
            )));
        }
        if let Some(&bad) = y.iter().find(|&&v| v != 0 && v != 1) {
            return Err(EnsembleError::InvalidData(format!(
                "labels must be 0 or 1, got {}",
                bad
            )));
        }
        Ok(Dataset { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f32> {
        self.x.row(i)
    }

    /// Count of (class 0, class 1) instances.
    pub fn class_counts(&self) -> (usize, usize) {
        let ones = self.y.iter().filter(|&&v| v == 1).count();
        (self.y.len() - ones, ones)
    }

    /// Select rows by index, duplicates allowed.
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let mut data = Vec::with_capacity(indices.len() * self.n_features());
        let mut labels = Vec::with_capacity(indices.len());
        for &i in indices {
            data.extend(self.row(i).iter().copied());
            labels.push(self.y[i]);
        }
        Dataset {
            x: Array2::from_shape_vec((indices.len(), self.n_features()), data)
                .expect("select_rows: shape mismatch"),
            y: Array1::from_vec(labels),
        }
    }

    /// Draw a resampled subset of size `ceil(fraction * n)`, sampling with
    /// replacement. Each node of the graph draws its own subset from an
    /// independently seeded generator.
    pub fn resample(&self, fraction: f64, rng: &mut StdRng) -> Dataset {
        let n = self.n_samples();
        let size = ((fraction * n as f64).ceil() as usize).max(1);
        let indices: Vec<usize> = (0..size).map(|_| rng.gen_range(0..n)).collect();
        self.select_rows(&indices)
    }
}
