//! Error types for spam-rs

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Label;

/// Result type alias for spam-rs operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Spam classifier error types
#[derive(Error, Debug)]
pub enum SpamError {
    /// Training corpus file does not exist
    #[error("Dataset not found at {}", .0.display())]
    DatasetNotFound(PathBuf),

    /// Corpus row carries a label other than `ham` or `spam`
    #[error("Unknown label '{label}' on line {line}")]
    UnknownLabel { line: usize, label: String },

    /// Corpus row could not be split into label and message
    #[error("Malformed row on line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// No documents to fit on
    #[error("Cannot fit on an empty corpus")]
    EmptyCorpus,

    /// Every token of every document was filtered out
    #[error("Vocabulary is empty: every document consists only of stop words")]
    EmptyVocabulary,

    /// Training data lacks one of the classes
    #[error("Training data contains no '{0}' examples")]
    MissingClass(Label),

    /// Train/test split would leave one side empty
    #[error("Invalid train/test split: {0}")]
    InvalidSplit(String),

    /// Feature vector does not match the fitted vocabulary
    #[error("Feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vectors and labels passed to fit differ in length
    #[error("Got {vectors} feature vectors but {labels} labels")]
    LengthMismatch { vectors: usize, labels: usize },

    /// Serving requested before a model was loaded
    #[error("Model not trained yet. Please run `spam-model train` first.")]
    ModelNotTrained,

    /// Artifact is unreadable, foreign, or fails its integrity check
    #[error("Corrupt artifact {}: {reason}", .path.display())]
    CorruptArtifact { path: PathBuf, reason: String },

    /// Vectorizer and classifier come from different training runs
    #[error("Vectorizer {vectorizer} and classifier {classifier} were not trained together")]
    IncompatibleArtifacts { vectorizer: String, classifier: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
