use crate::config::WeakLearnerConfig;
use crate::models::classifier_trait::{Capabilities, WeakClassifier};
use crate::models::logistic::LogisticClassifier;
use crate::models::stump::DecisionStump;

/// Build a boxed weak classifier from a `WeakLearnerConfig`.
/// The registry is closed: every graph node is constructed through this match.
pub fn build_weak(config: &WeakLearnerConfig) -> Box<dyn WeakClassifier> {
    match config {
        WeakLearnerConfig::Logistic {
            learning_rate,
            max_iter,
            tol,
        } => Box::new(LogisticClassifier::new(*learning_rate, *max_iter, *tol)),
        WeakLearnerConfig::Stump => Box::new(DecisionStump::new()),
    }
}

/// Capabilities of the configured weak learner. The ensemble accepts the same
/// input domain as its members, so this is what the top-level classifier
/// reports.
pub fn capabilities(config: &WeakLearnerConfig) -> Capabilities {
    build_weak(config).capabilities()
}
