//! Graph representation of the weak-classifier pool.
//!
//! The build is a pipeline of phases, each producing an immutable snapshot
//! consumed by the next:
//!
//! 1. [`train_pool`] resamples, trains, and evaluates one classifier per node.
//! 2. [`weight_edges`] connects the pool under the configured topology and
//!    assigns each pairwise edge the marginal error of combining its two
//!    classifiers.
//! 3. [`search::shortest_path`] selects the minimum-cost source-to-sink chain.
//!
//! Both the node-training and edge-weighting phases are independent across
//! items and run on the rayon thread pool; determinism is preserved by seeding
//! each node from the global seed plus its pool index.
pub mod search;

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::config::{EnsembleConfig, Topology};
use crate::data::Dataset;
use crate::error::EnsembleError;
use crate::models::factory;
use crate::models::WeakClassifier;
use crate::path::{PathClassifier, PathScoring, PathStep};

/// Graph vertex. The two sentinels carry no classifier; `Node` indexes into
/// the trained pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertex {
    Source,
    Sink,
    Node(usize),
}

/// Wraps one trained weak classifier, its identity, and its accuracy-derived
/// weight.
pub struct ClassifierNode {
    /// Unique within a graph; formatted from the pool index.
    pub id: String,
    /// Position in the configured pool. Kept because excluded nodes
    /// leave gaps, and the layered topology derives the layer from it.
    pub index: usize,
    pub classifier: Box<dyn WeakClassifier>,
    /// Accuracy over the full training set, in [0, 1].
    pub weight: f64,
}

impl PartialEq for ClassifierNode {
    /// Identity is by id only; callers must never reuse ids within a graph.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for ClassifierNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:.4})", self.id, self.weight)
    }
}

impl fmt::Debug for ClassifierNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClassifierNode")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Directed, weighted connection between two vertices. The weight is a signed
/// cost, lower is better; pairwise edges are frequently negative.
#[derive(Debug, Clone)]
pub struct ClassifierEdge {
    pub source: Vertex,
    pub target: Vertex,
    pub weight: f64,
}

impl fmt::Display for ClassifierEdge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = |v: Vertex| match v {
            Vertex::Source => "s".to_string(),
            Vertex::Sink => "t".to_string(),
            Vertex::Node(k) => format!("n{}", k),
        };
        write!(
            f,
            "{}--({:+.4})->{}",
            name(self.source),
            self.weight,
            name(self.target)
        )
    }
}

/// Snapshot produced by the node-training phase.
#[derive(Debug)]
pub struct TrainedPool {
    pub nodes: Vec<Arc<ClassifierNode>>,
}

/// Fully weighted graph, the exclusive owner of its nodes and edges. No
/// external mutation happens after `weight_edges` returns.
pub struct EnsembleGraph {
    pub nodes: Vec<Arc<ClassifierNode>>,
    pub edges: Vec<ClassifierEdge>,
}

impl EnsembleGraph {
    pub fn node(&self, vertex: Vertex) -> Option<&Arc<ClassifierNode>> {
        match vertex {
            Vertex::Node(k) => self.nodes.get(k),
            _ => None,
        }
    }
}

/// Train one weak classifier per pool slot on an independently resampled
/// subset and evaluate it on the full training set.
///
/// A node whose training fails is logged and excluded; fewer than the
/// configured count may result. An empty pool is fatal.
pub fn train_pool(cfg: &EnsembleConfig, data: &Dataset) -> Result<TrainedPool, EnsembleError> {
    train_pool_with(cfg, data, |_| factory::build_weak(&cfg.weak_learner))
}

/// `train_pool` with the classifier constructor factored out, so tests can
/// inject failing learners and exercise the exclusion policy.
fn train_pool_with<F>(
    cfg: &EnsembleConfig,
    data: &Dataset,
    build: F,
) -> Result<TrainedPool, EnsembleError>
where
    F: Fn(usize) -> Box<dyn WeakClassifier> + Sync,
{
    let n = cfg.topology.pool_size();
    log::info!(
        "training pool of {} weak classifiers (p = {}, seed = {})",
        n,
        cfg.resample_fraction,
        cfg.seed
    );

    let trained: Vec<Option<ClassifierNode>> = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(cfg.seed.wrapping_add(i as u64));
            let subset = data.resample(cfg.resample_fraction, &mut rng);
            let mut classifier = build(i);
            match classifier.fit(&subset) {
                Ok(()) => {
                    let weight = classifier.evaluate(data);
                    log::debug!("node {:03}: accuracy {:.4}", i, weight);
                    Some(ClassifierNode {
                        id: format!("{:03}", i),
                        index: i,
                        classifier,
                        weight,
                    })
                }
                Err(e) => {
                    log::warn!("node {:03} failed to train, excluding: {}", i, e);
                    None
                }
            }
        })
        .collect();

    let nodes: Vec<Arc<ClassifierNode>> =
        trained.into_iter().flatten().map(Arc::new).collect();
    if nodes.is_empty() {
        return Err(EnsembleError::EmptyPool);
    }
    if nodes.len() < n {
        log::warn!("{} of {} nodes excluded after training failures", n - nodes.len(), n);
    }
    Ok(TrainedPool { nodes })
}

/// Vertex pair eligibility under the topology rule.
fn eligible_pairs(topology: &Topology, nodes: &[Arc<ClassifierNode>]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..nodes.len() {
        for j in 0..nodes.len() {
            if i == j {
                continue;
            }
            let keep = match topology {
                Topology::Complete { .. } => true,
                Topology::Layered { .. } => {
                    let li = topology.layer_of(nodes[i].index);
                    let lj = topology.layer_of(nodes[j].index);
                    matches!((li, lj), (Some(a), Some(b)) if b == a + 1)
                }
            };
            if keep {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Connect the trained pool into a weighted graph.
///
/// Sentinel edges: `Source -> node` costs `1 - weight` (the node's own error),
/// `node -> Sink` costs the configured sink weight. Under the layered topology
/// only first-layer nodes connect to the source and only last-layer nodes to
/// the sink.
///
/// Pairwise edges: for each eligible ordered pair a throwaway `PathClassifier`
/// over just that pair is fit and evaluated on the training set, and the edge
/// costs `(1 - acc) - (1 - w_i)` — the marginal error change of appending the
/// target classifier after the source, relative to the source acting alone.
pub fn weight_edges(
    pool: TrainedPool,
    data: &Dataset,
    cfg: &EnsembleConfig,
) -> Result<EnsembleGraph, EnsembleError> {
    let nodes = pool.nodes;
    let topology = &cfg.topology;

    let mut edges = Vec::new();
    for (k, node) in nodes.iter().enumerate() {
        let (to_source, to_sink) = match topology {
            Topology::Complete { .. } => (true, true),
            Topology::Layered { num_layers, .. } => {
                let layer = topology.layer_of(node.index);
                (layer == Some(0), layer == Some(num_layers - 1))
            }
        };
        if to_source {
            edges.push(ClassifierEdge {
                source: Vertex::Source,
                target: Vertex::Node(k),
                weight: 1.0 - node.weight,
            });
        }
        if to_sink {
            edges.push(ClassifierEdge {
                source: Vertex::Node(k),
                target: Vertex::Sink,
                weight: cfg.sink_weight,
            });
        }
    }

    let pairs = eligible_pairs(topology, &nodes);
    log::info!("weighting {} pairwise edges", pairs.len());

    let pairwise: Vec<ClassifierEdge> = pairs
        .into_par_iter()
        .map(|(i, j)| {
            let ci = &nodes[i];
            let cj = &nodes[j];
            let (steps, scoring) = match topology {
                // The throwaway path mirrors how the pair would sit in a final
                // chain: the candidate edge plus the target's sink edge, scored
                // over edge sources.
                Topology::Complete { .. } => (
                    vec![
                        PathStep {
                            source: Some(ci.clone()),
                            target: Some(cj.clone()),
                        },
                        PathStep {
                            source: Some(cj.clone()),
                            target: None,
                        },
                    ],
                    PathScoring::SourceOnly,
                ),
                // Layered edges stand for adjacent pairs; both endpoints score.
                Topology::Layered { .. } => (
                    vec![PathStep {
                        source: Some(ci.clone()),
                        target: Some(cj.clone()),
                    }],
                    PathScoring::BothEndpoints,
                ),
            };

            let mut throwaway = PathClassifier::new(steps, scoring);
            throwaway.fit(data)?;
            let acc = throwaway.evaluate(data)?;
            let weight = (1.0 - acc) - (1.0 - ci.weight);
            log::trace!(
                "edge {} -> {}: acc = {:.4}, w = {:+.4}",
                ci.id,
                cj.id,
                acc,
                weight
            );
            Ok(ClassifierEdge {
                source: Vertex::Node(i),
                target: Vertex::Node(j),
                weight,
            })
        })
        .collect::<Result<_, EnsembleError>>()?;

    edges.extend(pairwise);
    Ok(EnsembleGraph { nodes, edges })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, ArrayView1};

    /// Learner that fails `fit` on demand, for exercising node exclusion.
    struct FaultyLearner {
        fail: bool,
    }

    impl WeakClassifier for FaultyLearner {
        fn fit(&mut self, _data: &Dataset) -> Result<(), EnsembleError> {
            if self.fail {
                Err(EnsembleError::Training("injected failure".to_string()))
            } else {
                Ok(())
            }
        }

        fn predict_proba(&self, _row: ArrayView1<'_, f32>) -> Vec<f32> {
            vec![0.5, 0.5]
        }
    }

    fn toy_data() -> Dataset {
        let x = Array2::from_shape_vec((4, 2), vec![0.0, 1.0, 1.0, 0.0, 0.5, 0.5, 1.0, 1.0])
            .unwrap();
        let y = Array1::from_vec(vec![0, 1, 0, 1]);
        Dataset::new(x, y).unwrap()
    }

    #[test]
    fn failed_nodes_are_excluded_and_pool_still_builds() {
        let cfg = EnsembleConfig::new(Topology::Complete { size: 4 });
        let pool = train_pool_with(&cfg, &toy_data(), |i| {
            Box::new(FaultyLearner { fail: i % 2 == 1 }) as Box<dyn WeakClassifier>
        })
        .unwrap();

        let indices: Vec<usize> = pool.nodes.iter().map(|n| n.index).collect();
        assert_eq!(indices, vec![0, 2], "failed slots leave gaps in the pool");
        assert_eq!(pool.nodes[1].id, "002", "id keeps the original slot");
    }

    #[test]
    fn all_failing_nodes_is_empty_pool() {
        let cfg = EnsembleConfig::new(Topology::Complete { size: 4 });
        let err = train_pool_with(&cfg, &toy_data(), |_| {
            Box::new(FaultyLearner { fail: true }) as Box<dyn WeakClassifier>
        })
        .unwrap_err();
        assert!(matches!(err, EnsembleError::EmptyPool));
    }
}
