//! Integration tests for the build phases: pool training, edge weighting, and
//! shortest-path selection.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pathboost::config::{EnsembleConfig, Topology, WeakLearnerConfig};
use pathboost::data::Dataset;
use pathboost::graph::{search, train_pool, weight_edges, Vertex};

/// Label 1 when either feature exceeds 0.5; noisy enough that weak learners
/// stay below perfect accuracy.
fn or_dataset(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n * 2);
    let mut labels = Vec::with_capacity(n);
    for _ in 0..n {
        let a: f32 = rng.gen();
        let b: f32 = rng.gen();
        rows.push(a);
        rows.push(b);
        labels.push(i32::from(a > 0.5 || b > 0.5));
    }
    Dataset::new(
        Array2::from_shape_vec((n, 2), rows).unwrap(),
        Array1::from_vec(labels),
    )
    .unwrap()
}

fn stump_config(topology: Topology) -> EnsembleConfig {
    EnsembleConfig {
        topology,
        resample_fraction: 0.5,
        sink_weight: 0.01,
        seed: 7,
        weak_learner: WeakLearnerConfig::Stump,
    }
}

// ---------------------------------------------------------------------------
// Pool training
// ---------------------------------------------------------------------------

#[test]
fn pool_training_is_reproducible() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Complete { size: 8 });

    let pool_a = train_pool(&cfg, &data).unwrap();
    let pool_b = train_pool(&cfg, &data).unwrap();

    assert_eq!(pool_a.nodes.len(), pool_b.nodes.len());
    for (a, b) in pool_a.nodes.iter().zip(pool_b.nodes.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.weight, b.weight);
    }
}

#[test]
fn node_weights_are_accuracies() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Complete { size: 8 });
    let pool = train_pool(&cfg, &data).unwrap();

    for node in &pool.nodes {
        assert!((0.0..=1.0).contains(&node.weight));
    }
}

// ---------------------------------------------------------------------------
// Edge weighting
// ---------------------------------------------------------------------------

#[test]
fn sentinel_edge_weights_are_exact() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Complete { size: 6 });
    let pool = train_pool(&cfg, &data).unwrap();
    let graph = weight_edges(pool, &data, &cfg).unwrap();

    let mut source_edges = 0;
    let mut sink_edges = 0;
    for edge in &graph.edges {
        match (edge.source, edge.target) {
            (Vertex::Source, Vertex::Node(k)) => {
                assert_eq!(edge.weight, 1.0 - graph.nodes[k].weight);
                source_edges += 1;
            }
            (Vertex::Node(_), Vertex::Sink) => {
                assert_eq!(edge.weight, cfg.sink_weight);
                sink_edges += 1;
            }
            _ => {}
        }
    }
    assert_eq!(source_edges, graph.nodes.len());
    assert_eq!(sink_edges, graph.nodes.len());
}

#[test]
fn complete_topology_connects_all_ordered_pairs() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Complete { size: 5 });
    let pool = train_pool(&cfg, &data).unwrap();
    let n = pool.nodes.len();
    let graph = weight_edges(pool, &data, &cfg).unwrap();

    let pairwise = graph
        .edges
        .iter()
        .filter(|e| matches!((e.source, e.target), (Vertex::Node(_), Vertex::Node(_))))
        .count();
    assert_eq!(pairwise, n * (n - 1), "edges for every ordered pair i != j");
}

#[test]
fn layered_topology_only_connects_adjacent_layers() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Layered {
        num_layers: 3,
        per_layer: 2,
    });
    let pool = train_pool(&cfg, &data).unwrap();
    let graph = weight_edges(pool, &data, &cfg).unwrap();

    for edge in &graph.edges {
        match (edge.source, edge.target) {
            (Vertex::Node(i), Vertex::Node(j)) => {
                let li = cfg.topology.layer_of(graph.nodes[i].index).unwrap();
                let lj = cfg.topology.layer_of(graph.nodes[j].index).unwrap();
                assert_eq!(lj, li + 1, "edges must step forward exactly one layer");
            }
            (Vertex::Source, Vertex::Node(k)) => {
                assert_eq!(cfg.topology.layer_of(graph.nodes[k].index), Some(0));
            }
            (Vertex::Node(k), Vertex::Sink) => {
                assert_eq!(cfg.topology.layer_of(graph.nodes[k].index), Some(2));
            }
            _ => panic!("unexpected edge {:?} -> {:?}", edge.source, edge.target),
        }
    }
}

// ---------------------------------------------------------------------------
// Shortest-path selection
// ---------------------------------------------------------------------------

#[test]
fn selected_path_never_worse_than_best_single_node() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Complete { size: 8 });
    let pool = train_pool(&cfg, &data).unwrap();
    let graph = weight_edges(pool, &data, &cfg).unwrap();

    let best_single = graph
        .nodes
        .iter()
        .map(|node| (1.0 - node.weight) + cfg.sink_weight)
        .fold(f64::INFINITY, f64::min);

    let path = search::shortest_path(&graph).unwrap();
    let total: f64 = path.iter().map(|e| e.weight).sum();
    assert!(
        total <= best_single + 1e-12,
        "path weight {} must not exceed best single-node weight {}",
        total,
        best_single
    );
}

#[test]
fn selected_path_starts_at_source_and_ends_at_sink() {
    let data = or_dataset(100, 3);
    let cfg = stump_config(Topology::Complete { size: 8 });
    let pool = train_pool(&cfg, &data).unwrap();
    let graph = weight_edges(pool, &data, &cfg).unwrap();

    let path = search::shortest_path(&graph).unwrap();
    assert_eq!(path.first().unwrap().source, Vertex::Source);
    assert_eq!(path.last().unwrap().target, Vertex::Sink);
    // Interior edges form a chain.
    for pair in path.windows(2) {
        assert_eq!(pair[0].target, pair[1].source);
    }
}
