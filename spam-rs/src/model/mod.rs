//! Fitted model: TF-IDF vectorizer paired with a Naive Bayes classifier

pub mod artifact;
pub mod classifier;
pub mod sparse;
pub mod vectorizer;

pub use classifier::MultinomialNb;
pub use sparse::SparseVector;
pub use vectorizer::{TfidfVectorizer, VectorizerState};

use tracing::info;

use crate::config::ArtifactPaths;
use crate::error::{Result, SpamError};
use crate::types::Classification;

/// A vectorizer and classifier produced by the same training run
#[derive(Debug, Clone)]
pub struct TrainedModel {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl TrainedModel {
    /// Pair a vectorizer with a classifier fitted on its output
    pub fn new(vectorizer: TfidfVectorizer, classifier: MultinomialNb) -> Result<Self> {
        if classifier.n_features() != vectorizer.vocabulary_size() {
            return Err(SpamError::DimensionMismatch {
                expected: vectorizer.vocabulary_size(),
                actual: classifier.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &MultinomialNb {
        &self.classifier
    }

    /// Vectorize and classify one message
    pub fn classify(&self, message: &str) -> Result<Classification> {
        let x = self.vectorizer.transform_one(message);
        self.classifier.predict(&x)
    }

    /// Persist both artifacts. The classifier is written last so a crash in
    /// between leaves a pair that fails the compatibility check on load.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        artifact::save_vectorizer(&paths.vectorizer_path, &self.vectorizer)?;
        artifact::save_classifier(
            &paths.model_path,
            &self.classifier,
            self.vectorizer.fingerprint(),
        )
    }

    /// Load both artifacts and check they belong together
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let vectorizer = artifact::load_vectorizer(&paths.vectorizer_path)?;
        let (classifier, tag) = artifact::load_classifier(&paths.model_path)?;

        if tag != vectorizer.fingerprint() || classifier.n_features() != vectorizer.vocabulary_size()
        {
            return Err(SpamError::IncompatibleArtifacts {
                vectorizer: paths.vectorizer_path.display().to_string(),
                classifier: paths.model_path.display().to_string(),
            });
        }

        info!(
            "Loaded model: {} terms, fingerprint {}",
            vectorizer.vocabulary_size(),
            &vectorizer.fingerprint()[..12]
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Tokenizer;
    use crate::types::Label;
    use tempfile::TempDir;

    fn train(docs: &[&str], labels: &[Label]) -> TrainedModel {
        let (v, xs) = TfidfVectorizer::fit_transform(Tokenizer::default(), docs).unwrap();
        let nb = MultinomialNb::fit(&xs, labels, 1.0).unwrap();
        TrainedModel::new(v, nb).unwrap()
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::in_dir(dir.path());
        let model = train(
            &["free prize inside", "project meeting notes"],
            &[Label::Spam, Label::Ham],
        );
        model.save(&paths).unwrap();

        let loaded = TrainedModel::load(&paths).unwrap();
        assert_eq!(
            loaded.classify("claim your free prize").unwrap(),
            model.classify("claim your free prize").unwrap()
        );
    }

    #[test]
    fn test_load_rejects_mixed_runs() {
        let dir = TempDir::new().unwrap();
        let a = ArtifactPaths::in_dir(&dir.path().join("a"));
        let b = ArtifactPaths::in_dir(&dir.path().join("b"));

        train(&["free prize", "meeting notes"], &[Label::Spam, Label::Ham])
            .save(&a)
            .unwrap();
        train(&["cash bonus", "lunch plans"], &[Label::Spam, Label::Ham])
            .save(&b)
            .unwrap();

        let mixed = ArtifactPaths::new(&a.vectorizer_path, &b.model_path);
        assert!(matches!(
            TrainedModel::load(&mixed),
            Err(SpamError::IncompatibleArtifacts { .. })
        ));
    }

    #[test]
    fn test_new_rejects_dimension_mismatch() {
        let small = train(&["free prize", "meeting notes"], &[Label::Spam, Label::Ham]);
        let large = train(
            &["free prize money", "meeting notes today"],
            &[Label::Spam, Label::Ham],
        );
        assert!(TrainedModel::new(
            small.vectorizer().clone(),
            large.classifier().clone()
        )
        .is_err());
    }
}
