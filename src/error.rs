use std::error::Error;
use std::fmt;

/// Custom error type for ensemble construction and prediction failures.
///
/// Per-node training failures are not represented here as a fatal case: they
/// are caught at the node-construction boundary, logged, and the node is
/// excluded from the pool. Only pool-level and search-level failures abort a
/// `build`.
#[derive(Debug)]
pub enum EnsembleError {
    /// Every weak classifier failed to train, or the configured pool is empty.
    EmptyPool,
    /// The sink is unreachable from the source after edge weighting.
    PathNotFound,
    /// The logistic link over path scores could not be fitted.
    MetaFit(String),
    /// A weak classifier failed to train (caught and logged per node).
    Training(String),
    /// `predict` was called before a successful `build`.
    NotBuilt,
    /// Rejected configuration values.
    InvalidConfig(String),
    /// Rejected dataset shape or labels.
    InvalidData(String),
}

impl fmt::Display for EnsembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnsembleError::EmptyPool => {
                write!(f, "no weak classifiers could be trained, graph cannot be formed")
            }
            EnsembleError::PathNotFound => {
                write!(f, "no path from source to sink in the classifier graph")
            }
            EnsembleError::MetaFit(msg) => write!(f, "logistic link fit failed: {}", msg),
            EnsembleError::Training(msg) => write!(f, "weak classifier training failed: {}", msg),
            EnsembleError::NotBuilt => {
                write!(f, "classifier has not been built; call build() before predicting")
            }
            EnsembleError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            EnsembleError::InvalidData(msg) => write!(f, "invalid dataset: {}", msg),
        }
    }
}

impl Error for EnsembleError {}
