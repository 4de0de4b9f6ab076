//! pathboost: graph-based ensemble classification.
//!
//! This crate assembles a pool of independently trained weak classifiers into a
//! weighted directed graph and selects, via shortest-path search, the subset and
//! ordering of weak classifiers that minimizes combined classification error.
//! The selected path is reduced to a single meta-classifier: a weighted sum of
//! member outputs fit through a logistic link.
//!
//! Two graph topologies are supported: a complete digraph over the pool (the
//! search may pick any chain of classifiers) and a layered DAG (the search is
//! forced to pick exactly one classifier per layer).
//!
//! The design favors small, testable modules: weak learners live behind the
//! [`models::WeakClassifier`] trait and are built from a closed registry, the
//! build is a pipeline of phases each producing an immutable snapshot, and
//! randomness is seeded per node for reproducibility.
pub mod config;
pub mod data;
pub mod ensemble;
pub mod error;
pub mod graph;
pub mod models;
pub mod path;
