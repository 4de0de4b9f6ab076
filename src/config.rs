use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EnsembleError;

/// Shape of the classifier graph searched during `build`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every ordered pair of pool members is connected. Direction matters for
    /// edge cost, so edges exist for both (i, j) and (j, i). The graph may
    /// contain cycles; path search must tolerate negative edge weights.
    Complete { size: usize },
    /// Pool members are partitioned into `num_layers` ordered layers of
    /// `per_layer` nodes each. Edges only run between consecutive layers, so
    /// the graph is a DAG and any source-to-sink path visits exactly one node
    /// per layer.
    Layered { num_layers: usize, per_layer: usize },
}

impl Topology {
    /// Total number of weak classifiers to train for this topology.
    pub fn pool_size(&self) -> usize {
        match self {
            Topology::Complete { size } => *size,
            Topology::Layered {
                num_layers,
                per_layer,
            } => num_layers * per_layer,
        }
    }

    /// Layer index of a pool member, by its position in the configured pool.
    /// Returns `None` for the complete topology.
    pub fn layer_of(&self, pool_index: usize) -> Option<usize> {
        match self {
            Topology::Complete { .. } => None,
            Topology::Layered { per_layer, .. } => Some(pool_index / per_layer),
        }
    }
}

/// Supported weak-learner kinds and their hyper-parameters.
///
/// The set is closed on purpose: callers pick a variant from this enum rather
/// than naming an arbitrary type, and the factory in `models::factory` maps
/// each variant to a constructor.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum WeakLearnerConfig {
    Logistic {
        learning_rate: f32,
        max_iter: usize,
        tol: f32,
    },
    Stump,
}

impl Default for WeakLearnerConfig {
    fn default() -> Self {
        WeakLearnerConfig::Logistic {
            learning_rate: 0.1,
            max_iter: 500,
            tol: 1e-4,
        }
    }
}

impl FromStr for WeakLearnerConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(WeakLearnerConfig::default()),
            "stump" => Ok(WeakLearnerConfig::Stump),
            _ => Err(format!(
                "Unknown weak learner: {}. Expected one of: logistic, stump",
                s
            )),
        }
    }
}

/// Central configuration for the graph ensemble.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct EnsembleConfig {
    pub topology: Topology,

    /// Fraction in (0, 1] of the training set drawn (with replacement) for
    /// each weak classifier.
    pub resample_fraction: f64,

    /// Weight of every node-to-sink edge. Serves as a threshold for the graph
    /// search: a classifier is only appended to the path when its marginal
    /// error reduction beats this cost.
    pub sink_weight: f64,

    /// Global seed. Node `i` draws its resample with seed `seed + i`, so node
    /// construction is reproducible under parallel execution.
    pub seed: u64,

    #[serde(flatten)]
    pub weak_learner: WeakLearnerConfig,
}

impl EnsembleConfig {
    pub fn new(topology: Topology) -> Self {
        EnsembleConfig {
            topology,
            ..EnsembleConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), EnsembleError> {
        if !(self.resample_fraction > 0.0 && self.resample_fraction <= 1.0) {
            return Err(EnsembleError::InvalidConfig(format!(
                "resample_fraction must be in (0, 1], got {}",
                self.resample_fraction
            )));
        }
        if !self.sink_weight.is_finite() {
            return Err(EnsembleError::InvalidConfig(
                "sink_weight must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            topology: Topology::Complete { size: 10 },
            resample_fraction: 0.10,
            sink_weight: 0.00,
            seed: 0,
            weak_learner: WeakLearnerConfig::default(),
        }
    }
}
