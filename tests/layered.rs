//! End-to-end tests for the layered (DAG-constrained) ensemble variant.

use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pathboost::config::{EnsembleConfig, Topology, WeakLearnerConfig};
use pathboost::data::Dataset;
use pathboost::ensemble::GraphEnsemble;

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

fn layered_config(num_layers: usize, per_layer: usize) -> EnsembleConfig {
    EnsembleConfig {
        topology: Topology::Layered {
            num_layers,
            per_layer,
        },
        resample_fraction: 0.5,
        sink_weight: 0.01,
        seed: 19,
        weak_learner: WeakLearnerConfig::Stump,
    }
}

#[test]
fn path_visits_exactly_one_node_per_layer() {
    let data = or_dataset(100, 9);
    let cfg = layered_config(3, 2);
    let mut model = GraphEnsemble::new(cfg.clone()).unwrap();
    model.build(&data).unwrap();

    let nodes = model.path().expect("built").nodes();
    assert_eq!(nodes.len(), 3, "one node per layer, regardless of search outcome");
    for (layer, node) in nodes.iter().enumerate() {
        assert_eq!(
            cfg.topology.layer_of(node.index),
            Some(layer),
            "path must visit layers in increasing order without skips"
        );
    }
}

#[test]
fn deeper_stacks_keep_the_guarantee() {
    let data = or_dataset(120, 13);
    let mut model = GraphEnsemble::new(layered_config(4, 3)).unwrap();
    model.build(&data).unwrap();
    assert_eq!(model.path().expect("built").nodes().len(), 4);
}

#[test]
fn layered_distributions_sum_to_one() {
    let data = or_dataset(100, 9);
    let mut model = GraphEnsemble::new(layered_config(3, 2)).unwrap();
    model.build(&data).unwrap();

    for i in 0..data.n_samples() {
        let proba = model.predict_proba(data.row(i)).unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-6);
    }
}

#[test]
fn layered_build_is_reproducible() {
    let data = or_dataset(100, 9);
    let mut a = GraphEnsemble::new(layered_config(3, 2)).unwrap();
    a.build(&data).unwrap();
    let mut b = GraphEnsemble::new(layered_config(3, 2)).unwrap();
    b.build(&data).unwrap();
    assert_eq!(a.path().unwrap().to_string(), b.path().unwrap().to_string());
}
