//! Labeled corpus loading
//!
//! The corpus is a tab-separated file without a header: one
//! `label<TAB>message` row per line, where label is `ham` or `spam`.

use std::path::Path;
use tracing::info;

use crate::error::{Result, SpamError};
use crate::types::Label;

/// One labeled message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub label: Label,
    pub message: String,
}

impl Example {
    pub fn new(label: Label, message: impl Into<String>) -> Self {
        Self {
            label,
            message: message.into(),
        }
    }
}

/// Ordered labeled messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    examples: Vec<Example>,
}

impl Corpus {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    /// Read and parse a corpus file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SpamError::DatasetNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let corpus = Self::parse(&content)?;

        let [ham, spam] = corpus.class_counts();
        info!("Loaded {} rows ({} ham, {} spam)", corpus.len(), ham, spam);
        Ok(corpus)
    }

    /// Parse tab-separated rows. Blank lines are skipped; anything after the
    /// first tab is the message, verbatim.
    pub fn parse(content: &str) -> Result<Self> {
        let mut examples = Vec::new();

        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }

            let (label, message) = line.split_once('\t').ok_or_else(|| SpamError::MalformedRow {
                line: line_no,
                reason: "expected label and message separated by a tab".to_string(),
            })?;

            let label = label.parse::<Label>().map_err(|_| SpamError::UnknownLabel {
                line: line_no,
                label: label.to_string(),
            })?;

            examples.push(Example::new(label, message));
        }

        Ok(Self { examples })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    pub fn messages(&self) -> Vec<&str> {
        self.examples.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.examples.iter().map(|e| e.label).collect()
    }

    /// Rows per class, indexed by `Label::index`
    pub fn class_counts(&self) -> [usize; Label::COUNT] {
        let mut counts = [0; Label::COUNT];
        for e in &self.examples {
            counts[e.label.index()] += 1;
        }
        counts
    }

    /// Rows at `indices`, in that order
    pub fn subset(&self, indices: &[usize]) -> Corpus {
        Corpus {
            examples: indices
                .iter()
                .filter_map(|&i| self.examples.get(i).cloned())
                .collect(),
        }
    }
}

impl FromIterator<Example> for Corpus {
    fn from_iter<I: IntoIterator<Item = Example>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rows() {
        let corpus =
            Corpus::parse("ham\tGo until jurong point\r\nspam\tFree entry\twith tab\n\nham\t\n")
                .unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.examples()[0], Example::new(Label::Ham, "Go until jurong point"));
        assert_eq!(corpus.examples()[1].message, "Free entry\twith tab");
        assert_eq!(corpus.examples()[2], Example::new(Label::Ham, ""));
        assert_eq!(corpus.class_counts(), [2, 1]);
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = Corpus::parse("ham\tok\nphish\tclick me\n").unwrap_err();
        match err {
            SpamError::UnknownLabel { line, label } => {
                assert_eq!(line, 2);
                assert_eq!(label, "phish");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_missing_tab() {
        assert!(matches!(
            Corpus::parse("ham no tab here\n"),
            Err(SpamError::MalformedRow { line: 1, .. })
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Corpus::from_file(&dir.path().join("SMSSpamCollection")),
            Err(SpamError::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_subset() {
        let corpus: Corpus = vec![
            Example::new(Label::Ham, "a"),
            Example::new(Label::Spam, "b"),
            Example::new(Label::Ham, "c"),
        ]
        .into_iter()
        .collect();
        let sub = corpus.subset(&[2, 0]);
        assert_eq!(sub.messages(), vec!["c", "a"]);
        assert_eq!(sub.labels(), vec![Label::Ham, Label::Ham]);
    }
}
