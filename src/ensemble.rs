//! Top-level graph ensemble classifier.
//!
//! `GraphEnsemble` runs the build pipeline — train the pool, weight the
//! edges, select the shortest path, fit the final `PathClassifier` — and then
//! serves predictions through the selected path.
use ndarray::ArrayView1;

use crate::config::{EnsembleConfig, Topology};
use crate::data::Dataset;
use crate::error::EnsembleError;
use crate::graph::{self, search, ClassifierEdge, EnsembleGraph, Vertex};
use crate::models::{factory, Capabilities};
use crate::path::{PathClassifier, PathScoring, PathStep};

pub struct GraphEnsemble {
    config: EnsembleConfig,
    graph: Option<EnsembleGraph>,
    path: Option<PathClassifier>,
}

impl GraphEnsemble {
    pub fn new(config: EnsembleConfig) -> Result<Self, EnsembleError> {
        config.validate()?;
        Ok(GraphEnsemble {
            config,
            graph: None,
            path: None,
        })
    }

    /// Build the ensemble model on the given training data.
    ///
    /// A failed build leaves the classifier unusable: subsequent predictions
    /// return `NotBuilt` rather than stale or garbage output.
    pub fn build(&mut self, data: &Dataset) -> Result<(), EnsembleError> {
        self.graph = None;
        self.path = None;

        let pool = graph::train_pool(&self.config, data)?;
        let weighted = graph::weight_edges(pool, data, &self.config)?;
        let selected = search::shortest_path(&weighted)?;
        let trimmed = trim_sentinel_edges(selected);

        let scoring = match self.config.topology {
            Topology::Complete { .. } => PathScoring::SourceOnly,
            Topology::Layered { .. } => PathScoring::BothEndpoints,
        };
        let steps: Vec<PathStep> = trimmed
            .iter()
            .map(|edge| PathStep {
                source: weighted.node(edge.source).cloned(),
                target: weighted.node(edge.target).cloned(),
            })
            .collect();

        let mut path = PathClassifier::new(steps, scoring);
        path.fit(data)?;
        log::info!("selected path: {} ({} nodes)", path, path.len());

        self.graph = Some(weighted);
        self.path = Some(path);
        Ok(())
    }

    pub fn predict(&self, row: ArrayView1<'_, f32>) -> Result<i32, EnsembleError> {
        self.path.as_ref().ok_or(EnsembleError::NotBuilt)?.predict(row)
    }

    /// Class probabilities `[p(0), p(1)]`, in the class order of the training
    /// data.
    pub fn predict_proba(&self, row: ArrayView1<'_, f32>) -> Result<Vec<f32>, EnsembleError> {
        self.path
            .as_ref()
            .ok_or(EnsembleError::NotBuilt)?
            .predict_proba(row)
    }

    /// Fraction of `data` classified correctly.
    pub fn evaluate(&self, data: &Dataset) -> Result<f64, EnsembleError> {
        self.path.as_ref().ok_or(EnsembleError::NotBuilt)?.evaluate(data)
    }

    /// The ensemble accepts the same input domain as its weak learners.
    pub fn capabilities(&self) -> Capabilities {
        factory::capabilities(&self.config.weak_learner)
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// The selected path classifier, if `build` succeeded.
    pub fn path(&self) -> Option<&PathClassifier> {
        self.path.as_ref()
    }

    /// The weighted graph, for diagnostics and tests.
    pub fn graph(&self) -> Option<&EnsembleGraph> {
        self.graph.as_ref()
    }
}

/// Drop the leading `Source -> node` and trailing `node -> Sink` edges; the
/// sentinels carry no classifier to evaluate at prediction time.
fn trim_sentinel_edges(mut edges: Vec<ClassifierEdge>) -> Vec<ClassifierEdge> {
    if edges.first().map(|e| e.source) == Some(Vertex::Source) {
        edges.remove(0);
    }
    if edges.last().map(|e| e.target) == Some(Vertex::Sink) {
        edges.pop();
    }
    edges
}
