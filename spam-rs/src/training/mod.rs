//! Offline training: corpus, split, evaluation and the pipeline itself

pub mod corpus;
pub mod metrics;
pub mod split;
pub mod trainer;

pub use corpus::{Corpus, Example};
pub use metrics::{ClassMetrics, EvaluationReport};
pub use split::{train_test_split, Split};
pub use trainer::{Trainer, TrainingOutcome};
