//! spam-rs: SMS spam classification
//!
//! A TF-IDF vectorizer feeding a multinomial Naive Bayes classifier, with
//! an offline training pipeline and a predictor for serving.
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::{Predictor, SpamConfig, Trainer};
//!
//! fn main() -> spam_rs::Result<()> {
//!     let config = SpamConfig::default();
//!     let outcome = Trainer::new(config.clone()).run()?;
//!     println!("{}", outcome.report);
//!
//!     let predictor = Predictor::load(&config.artifacts);
//!     let result = predictor.classify("You win a free prize now")?;
//!     println!("{} ({}%)", result.display_label(), result.percent());
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`text`]: Tokenizer and stop words
//! - [`model`]: Vectorizer, classifier and artifact persistence
//! - [`training`]: Corpus loading, split, evaluation, training pipeline
//! - [`predictor`]: Serving-side classifier with hot reload

pub mod config;
pub mod error;
pub mod model;
pub mod predictor;
pub mod text;
pub mod training;
pub mod types;

// Re-export commonly used types
pub use config::{ArtifactPaths, SpamConfig};
pub use error::{Result, SpamError};
pub use model::TrainedModel;
pub use predictor::{HealthStatus, Predictor};
pub use training::{Corpus, EvaluationReport, Trainer};
pub use types::{Classification, Label};
