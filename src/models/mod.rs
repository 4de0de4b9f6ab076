pub mod classifier_trait;
pub mod factory;
pub mod logistic;
pub mod stump;

pub use classifier_trait::{Capabilities, WeakClassifier};
