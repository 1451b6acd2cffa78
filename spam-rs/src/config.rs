//! Configuration for spam-rs
//!
//! Every field has a default, so a missing or partial file still yields a
//! working development setup.
//!
//! ```toml
//! [dataset]
//! path = "data/SMSSpamCollection"
//!
//! [artifacts]
//! vectorizer_path = "artifacts/vectorizer.json"
//! model_path = "artifacts/spam_model.json"
//!
//! [training]
//! test_size = 0.2
//! seed = 42
//! alpha = 1.0
//!
//! [vectorizer]
//! lowercase = true
//! stop_words = "english"
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SpamError};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SpamConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
}

/// Training corpus location
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Tab-separated `label<TAB>message` file, no header
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

/// Where the fitted vectorizer and classifier live
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArtifactPaths {
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

/// Split and smoothing parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f64,
    /// Seed for the shuffle that produces the split
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Additive smoothing constant
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

/// Tokenizer settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VectorizerConfig {
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    /// Regex whose matches are the tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default)]
    pub stop_words: StopWordList,
}

/// Stop word source
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopWordList {
    /// Builtin English list
    #[default]
    English,
    /// Keep every token
    None,
    /// Caller-supplied words
    Custom(Vec<String>),
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("SMSSpamCollection")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("vectorizer.json")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("spam_model.json")
}

fn default_test_size() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_alpha() -> f64 {
    1.0
}

fn default_lowercase() -> bool {
    true
}

pub(crate) fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            vectorizer_path: default_vectorizer_path(),
            model_path: default_model_path(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
            seed: default_seed(),
            alpha: default_alpha(),
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            stop_words: StopWordList::default(),
        }
    }
}

impl ArtifactPaths {
    pub fn new(vectorizer_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            vectorizer_path: vectorizer_path.into(),
            model_path: model_path.into(),
        }
    }

    /// Both artifacts placed in `dir` under their default file names
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(default_vectorizer_path()),
            dir.join(default_model_path()),
        )
    }
}

impl SpamConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        self.vectorizer.validate()
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(SpamError::Config(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SpamError::Config(format!(
                "alpha must be a positive number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        Regex::new(&self.token_pattern).map_err(|e| {
            SpamError::Config(format!("Invalid token_pattern '{}': {}", self.token_pattern, e))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpamConfig::default();
        assert_eq!(config.training.test_size, 0.2);
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.alpha, 1.0);
        assert_eq!(config.vectorizer.stop_words, StopWordList::English);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[dataset]
path = "data/sms.tsv"

[training]
seed = 7

[vectorizer]
stop_words = { custom = ["foo", "bar"] }
"#;
        let config: SpamConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/sms.tsv"));
        assert_eq!(config.training.seed, 7);
        assert_eq!(config.training.test_size, 0.2);
        assert_eq!(config.artifacts, ArtifactPaths::default());
        assert_eq!(
            config.vectorizer.stop_words,
            StopWordList::Custom(vec!["foo".to_string(), "bar".to_string()])
        );
    }

    #[test]
    fn test_parse_no_stop_words() {
        let config: SpamConfig = toml::from_str("[vectorizer]\nstop_words = \"none\"\n").unwrap();
        assert_eq!(config.vectorizer.stop_words, StopWordList::None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SpamConfig::default();
        config.training.test_size = 1.0;
        assert!(config.validate().is_err());

        let mut config = SpamConfig::default();
        config.training.alpha = 0.0;
        assert!(config.validate().is_err());

        let mut config = SpamConfig::default();
        config.vectorizer.token_pattern = "(".to_string();
        assert!(config.validate().is_err());
    }
}
