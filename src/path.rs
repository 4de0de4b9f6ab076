//! Meta-classifier over an ordered chain of weak classifiers.
//!
//! A `PathClassifier` reduces the edges selected by the graph search into a
//! single model: the weighted sum of member class-1 probabilities is fed
//! through a logistic link fitted on the training set. Throwaway instances of
//! the same type are used during edge weighting to measure the marginal error
//! of candidate classifier pairs.
use std::fmt;
use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView1};

use crate::data::Dataset;
use crate::error::EnsembleError;
use crate::graph::ClassifierNode;
use crate::models::logistic::LogisticClassifier;
use crate::models::WeakClassifier;

/// How member predictions are accumulated along the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScoring {
    /// Each edge contributes its source node once. Used with the complete
    /// topology, where consecutive edges share nodes; the terminal node of the
    /// path never contributes its own prediction directly.
    SourceOnly,
    /// Each edge contributes both endpoints once, sentinels excluded. Used
    /// with the layered topology, where an edge stands for an adjacent pair.
    BothEndpoints,
}

/// One edge of the (trimmed) path. `None` marks a sentinel endpoint, which
/// carries no classifier to evaluate.
#[derive(Clone)]
pub struct PathStep {
    pub source: Option<Arc<ClassifierNode>>,
    pub target: Option<Arc<ClassifierNode>>,
}

pub struct PathClassifier {
    steps: Vec<PathStep>,
    scoring: PathScoring,
    link: Option<LogisticClassifier>,
}

impl PathClassifier {
    pub fn new(steps: Vec<PathStep>, scoring: PathScoring) -> Self {
        PathClassifier {
            steps,
            scoring,
            link: None,
        }
    }

    /// Weighted sum of member class-1 probabilities for one instance.
    pub fn score(&self, row: ArrayView1<'_, f32>) -> f64 {
        let contribution = |node: &Arc<ClassifierNode>| {
            node.weight * f64::from(node.classifier.predict_proba(row)[1])
        };

        let mut sum = 0.0;
        for step in &self.steps {
            match self.scoring {
                PathScoring::SourceOnly => {
                    if let Some(node) = &step.source {
                        sum += contribution(node);
                    }
                }
                PathScoring::BothEndpoints => {
                    if let Some(node) = &step.source {
                        sum += contribution(node);
                    }
                    if let Some(node) = &step.target {
                        sum += contribution(node);
                    }
                }
            }
        }
        sum
    }

    /// Fit the logistic link on path scores over the full training set. The
    /// score is the sole feature; the link is the only learned component at
    /// this stage.
    pub fn fit(&mut self, data: &Dataset) -> Result<(), EnsembleError> {
        let (zeros, ones) = data.class_counts();
        if zeros == 0 || ones == 0 {
            return Err(EnsembleError::MetaFit(
                "training data contains a single class value".to_string(),
            ));
        }

        let scores: Vec<f32> = (0..data.n_samples())
            .map(|i| self.score(data.row(i)) as f32)
            .collect();
        let sums = Dataset::new(
            Array2::from_shape_vec((scores.len(), 1), scores)
                .expect("path scores: shape mismatch"),
            data.y.clone(),
        )?;

        let mut link = LogisticClassifier::new(0.5, 1000, 1e-6);
        link.fit(&sums)
            .map_err(|e| EnsembleError::MetaFit(e.to_string()))?;
        self.link = Some(link);
        Ok(())
    }

    /// Class probabilities `[p(0), p(1)]` for one instance.
    pub fn predict_proba(&self, row: ArrayView1<'_, f32>) -> Result<Vec<f32>, EnsembleError> {
        let link = self.link.as_ref().ok_or(EnsembleError::NotBuilt)?;
        let feature = Array1::from_vec(vec![self.score(row) as f32]);
        Ok(link.predict_proba(feature.view()))
    }

    /// Predicted label, 0 or 1.
    pub fn predict(&self, row: ArrayView1<'_, f32>) -> Result<i32, EnsembleError> {
        let proba = self.predict_proba(row)?;
        Ok(i32::from(proba[1] >= proba[0]))
    }

    /// Fraction of `data` classified correctly. Also used as the accuracy
    /// metric inside edge weighting.
    pub fn evaluate(&self, data: &Dataset) -> Result<f64, EnsembleError> {
        if data.n_samples() == 0 {
            return Ok(0.0);
        }
        let mut right = 0usize;
        for i in 0..data.n_samples() {
            if self.predict(data.row(i))? == data.y[i] {
                right += 1;
            }
        }
        Ok(right as f64 / data.n_samples() as f64)
    }

    /// Interior nodes along the path, in order. Steps form a chain, so this is
    /// every step's source plus the final step's target.
    pub fn nodes(&self) -> Vec<Arc<ClassifierNode>> {
        let mut chain: Vec<Arc<ClassifierNode>> = self
            .steps
            .iter()
            .filter_map(|s| s.source.clone())
            .collect();
        if let Some(last) = self.steps.last() {
            if let Some(target) = &last.target {
                chain.push(target.clone());
            }
        }
        chain
    }

    /// Number of interior nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for PathClassifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chain = self.nodes();
        if chain.is_empty() {
            return write!(f, "(empty path)");
        }
        for (i, node) in chain.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", node.id)?;
        }
        Ok(())
    }
}
