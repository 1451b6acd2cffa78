//! Labels and classification results

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpamError;

/// Binary message class. The discriminant is the class index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham = 0,
    Spam = 1,
}

impl Label {
    /// All classes in index order
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// Number of classes
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Ham => "ham",
            Label::Spam => "spam",
        }
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = SpamError;

    /// Parse a corpus label. Only the exact strings `ham` and `spam` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ham" => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other => Err(SpamError::UnknownLabel {
                line: 0,
                label: other.to_string(),
            }),
        }
    }
}

/// Result of classifying a single message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Predicted class
    pub label: Label,
    /// Probability of the predicted class, in [0, 1]
    pub probability: f64,
    /// Convenience flag, `label == Spam`
    pub is_spam: bool,
    /// Full distribution, indexed by `Label::index`
    pub probabilities: [f64; Label::COUNT],
}

impl Classification {
    pub fn new(label: Label, probabilities: [f64; Label::COUNT]) -> Self {
        Self {
            label,
            probability: probabilities[label.index()],
            is_spam: label.is_spam(),
            probabilities,
        }
    }

    /// Human-readable verdict
    pub fn display_label(&self) -> &'static str {
        if self.is_spam {
            "Spam"
        } else {
            "Not Spam"
        }
    }

    /// Winning probability as a percentage rounded to two decimals
    pub fn percent(&self) -> f64 {
        (self.probability * 100.0 * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse() {
        assert_eq!("ham".parse::<Label>().unwrap(), Label::Ham);
        assert_eq!("spam".parse::<Label>().unwrap(), Label::Spam);
        assert!(matches!(
            "Spam".parse::<Label>(),
            Err(SpamError::UnknownLabel { .. })
        ));
        assert!("".parse::<Label>().is_err());
    }

    #[test]
    fn test_label_index_roundtrip() {
        for label in Label::ALL {
            assert_eq!(Label::from_index(label.index()), Some(label));
        }
        assert_eq!(Label::from_index(2), None);
    }

    #[test]
    fn test_classification_percent() {
        let c = Classification::new(Label::Spam, [0.123456, 0.876544]);
        assert!(c.is_spam);
        assert_eq!(c.display_label(), "Spam");
        assert_eq!(c.percent(), 87.65);

        let c = Classification::new(Label::Ham, [1.0, 0.0]);
        assert_eq!(c.display_label(), "Not Spam");
        assert_eq!(c.percent(), 100.0);
    }
}
