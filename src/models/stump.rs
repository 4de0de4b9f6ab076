use ndarray::ArrayView1;

use crate::data::Dataset;
use crate::error::EnsembleError;
use crate::models::classifier_trait::WeakClassifier;

/// Single-feature threshold classifier.
///
/// Scans every feature for the threshold minimizing training error and stores
/// the class-1 fraction on each side of the split, so `predict_proba` reports
/// smoothed leaf purities rather than hard 0/1 votes.
#[derive(Debug, Clone, Default)]
pub struct DecisionStump {
    split: Option<Split>,
}

#[derive(Debug, Clone)]
struct Split {
    feature: usize,
    threshold: f32,
    /// P(class 1) for rows with feature value <= threshold.
    p1_le: f32,
    /// P(class 1) for rows with feature value > threshold.
    p1_gt: f32,
}

impl DecisionStump {
    pub fn new() -> Self {
        DecisionStump { split: None }
    }

    /// Laplace-smoothed class-1 fraction.
    fn purity(ones: usize, total: usize) -> f32 {
        (ones as f32 + 1.0) / (total as f32 + 2.0)
    }
}

impl WeakClassifier for DecisionStump {
    fn fit(&mut self, data: &Dataset) -> Result<(), EnsembleError> {
        let n = data.n_samples();
        if n == 0 {
            return Err(EnsembleError::Training(
                "cannot fit on an empty dataset".to_string(),
            ));
        }

        let mut best: Option<(usize, Split)> = None;

        for feature in 0..data.n_features() {
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_unstable_by(|&a, &b| {
                data.x[(a, feature)]
                    .partial_cmp(&data.x[(b, feature)])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let total_ones = data.y.iter().filter(|&&v| v == 1).count();
            let mut left_ones = 0usize;

            // Candidate thresholds are midpoints between consecutive distinct
            // sorted values; rows 0..=k fall on the <= side.
            for (k, &idx) in order.iter().enumerate() {
                if data.y[idx] == 1 {
                    left_ones += 1;
                }
                if k + 1 == n {
                    break;
                }
                let lo = data.x[(idx, feature)];
                let hi = data.x[(order[k + 1], feature)];
                if lo == hi {
                    continue;
                }
                let threshold = (lo + hi) / 2.0;

                let left_n = k + 1;
                let right_n = n - left_n;
                let right_ones = total_ones - left_ones;

                // Majority vote on each side.
                let errors = left_ones.min(left_n - left_ones)
                    + right_ones.min(right_n - right_ones);

                if best.as_ref().map_or(true, |(e, _)| errors < *e) {
                    best = Some((
                        errors,
                        Split {
                            feature,
                            threshold,
                            p1_le: Self::purity(left_ones, left_n),
                            p1_gt: Self::purity(right_ones, right_n),
                        },
                    ));
                }
            }
        }

        // All feature columns constant: predict the overall class-1 fraction.
        let split = best.map(|(_, s)| s).unwrap_or_else(|| {
            let ones = data.y.iter().filter(|&&v| v == 1).count();
            let p = Self::purity(ones, n);
            Split {
                feature: 0,
                threshold: f32::INFINITY,
                p1_le: p,
                p1_gt: p,
            }
        });

        self.split = Some(split);
        Ok(())
    }

    fn predict_proba(&self, row: ArrayView1<'_, f32>) -> Vec<f32> {
        match &self.split {
            Some(s) => {
                let p1 = if row[s.feature] <= s.threshold {
                    s.p1_le
                } else {
                    s.p1_gt
                };
                vec![1.0 - p1, p1]
            }
            None => vec![0.5, 0.5],
        }
    }

    fn name(&self) -> &str {
        "stump"
    }
}
