//! Query intent classification.

mod classifier;

pub use classifier::{classify, IntentClassifier, INTENT_KEYWORDS};
