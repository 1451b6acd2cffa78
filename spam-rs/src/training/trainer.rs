//! Training pipeline
//!
//! load corpus -> split -> fit vectorizer on the training rows -> fit
//! classifier -> evaluate on the held-out rows -> persist both artifacts.
//! Any failure aborts the run before anything is written.

use tracing::info;

use super::corpus::Corpus;
use super::metrics::EvaluationReport;
use super::split::train_test_split;
use crate::config::SpamConfig;
use crate::error::Result;
use crate::model::{MultinomialNb, TfidfVectorizer, TrainedModel};
use crate::text::Tokenizer;

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub model: TrainedModel,
    pub report: EvaluationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Offline trainer
pub struct Trainer {
    config: SpamConfig,
}

impl Trainer {
    pub fn new(config: SpamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpamConfig {
        &self.config
    }

    /// Full pipeline: load the configured dataset, fit, evaluate and save
    pub fn run(&self) -> Result<TrainingOutcome> {
        self.config.validate()?;

        let corpus = Corpus::from_file(&self.config.dataset.path)?;
        let outcome = self.fit(&corpus)?;

        outcome.model.save(&self.config.artifacts)?;
        info!(
            "Model saved to {}",
            self.config.artifacts.model_path.display()
        );
        info!(
            "Vectorizer saved to {}",
            self.config.artifacts.vectorizer_path.display()
        );

        Ok(outcome)
    }

    /// Split, fit and evaluate without touching the filesystem
    pub fn fit(&self, corpus: &Corpus) -> Result<TrainingOutcome> {
        let training = &self.config.training;
        let split = train_test_split(corpus.len(), training.test_size, training.seed)?;
        let train = corpus.subset(&split.train);
        let test = corpus.subset(&split.test);
        info!(
            "Split {} rows into {} train / {} test (seed {})",
            corpus.len(),
            train.len(),
            test.len(),
            training.seed
        );

        let tokenizer = Tokenizer::from_config(&self.config.vectorizer)?;
        let (vectorizer, train_vectors) =
            TfidfVectorizer::fit_transform(tokenizer, &train.messages())?;
        info!("Vocabulary size: {}", vectorizer.vocabulary_size());

        let classifier = MultinomialNb::fit(&train_vectors, &train.labels(), training.alpha)?;
        let model = TrainedModel::new(vectorizer, classifier)?;

        let test_vectors = model.vectorizer().transform(&test.messages());
        let predicted: Vec<_> = model
            .classifier()
            .predict_batch(&test_vectors)?
            .into_iter()
            .map(|c| c.label)
            .collect();
        let report = EvaluationReport::compute(&test.labels(), &predicted);

        info!("Accuracy: {:.4}", report.accuracy);
        info!("Classification report:\n{}", report);

        Ok(TrainingOutcome {
            model,
            report,
            train_rows: train.len(),
            test_rows: test.len(),
        })
    }
}
