//! Regex tokenizer
//!
//! Text is optionally lowercased, split into the matches of a token
//! pattern, and stripped of stop words. The same tokenizer instance is used
//! at fit time and at transform time.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::stopwords::StopWords;
use crate::config::VectorizerConfig;
use crate::error::{Result, SpamError};

/// Persistable tokenizer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerSettings {
    pub token_pattern: String,
    pub lowercase: bool,
    /// Sorted stop word list
    pub stop_words: Vec<String>,
}

/// Tokenizer shared by fitting and transforming
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
    lowercase: bool,
    stop_words: StopWords,
}

impl Tokenizer {
    pub fn new(token_pattern: &str, lowercase: bool, stop_words: StopWords) -> Result<Self> {
        let pattern = Regex::new(token_pattern).map_err(|e| {
            SpamError::Config(format!("Invalid token pattern '{}': {}", token_pattern, e))
        })?;

        Ok(Self {
            pattern,
            lowercase,
            stop_words,
        })
    }

    pub fn from_config(config: &VectorizerConfig) -> Result<Self> {
        Self::new(
            &config.token_pattern,
            config.lowercase,
            StopWords::from_list(&config.stop_words),
        )
    }

    pub fn from_settings(settings: &TokenizerSettings) -> Result<Self> {
        Self::new(
            &settings.token_pattern,
            settings.lowercase,
            StopWords::new(settings.stop_words.iter().cloned()),
        )
    }

    pub fn settings(&self) -> TokenizerSettings {
        TokenizerSettings {
            token_pattern: self.pattern.as_str().to_string(),
            lowercase: self.lowercase,
            stop_words: self.stop_words.to_sorted_vec(),
        }
    }

    /// Split text into tokens, in document order, duplicates kept
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        self.pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(token))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            pattern: Regex::new(&crate::config::default_token_pattern())
                .expect("Default token pattern must compile"),
            lowercase: true,
            stop_words: StopWords::english(),
        }
    }
}
