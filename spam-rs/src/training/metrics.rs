//! Held-out evaluation: accuracy and a per-class report

use serde::Serialize;
use std::fmt;

use crate::types::Label;

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Evaluation of predictions against true labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    /// `confusion[true][predicted]`
    pub confusion: [[usize; Label::COUNT]; Label::COUNT],
    pub per_class: [ClassMetrics; Label::COUNT],
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl EvaluationReport {
    /// Compare `predicted` with `actual`, pairwise. Extra entries in the
    /// longer slice are ignored.
    pub fn compute(actual: &[Label], predicted: &[Label]) -> Self {
        let mut confusion = [[0usize; Label::COUNT]; Label::COUNT];
        for (t, p) in actual.iter().zip(predicted) {
            confusion[t.index()][p.index()] += 1;
        }

        let total: usize = confusion.iter().flatten().sum();
        let correct: usize = (0..Label::COUNT).map(|c| confusion[c][c]).sum();

        let per_class = Label::ALL.map(|label| {
            let c = label.index();
            let tp = confusion[c][c];
            let predicted_c: usize = (0..Label::COUNT).map(|t| confusion[t][c]).sum();
            let support: usize = confusion[c].iter().sum();

            let precision = ratio(tp, predicted_c);
            let recall = ratio(tp, support);
            let f1 = if precision + recall == 0.0 {
                0.0
            } else {
                2.0 * precision * recall / (precision + recall)
            };

            ClassMetrics {
                precision,
                recall,
                f1,
                support,
            }
        });

        let n = Label::COUNT as f64;
        let macro_avg = ClassMetrics {
            precision: per_class.iter().map(|m| m.precision).sum::<f64>() / n,
            recall: per_class.iter().map(|m| m.recall).sum::<f64>() / n,
            f1: per_class.iter().map(|m| m.f1).sum::<f64>() / n,
            support: total,
        };

        let weight = |f: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                per_class
                    .iter()
                    .map(|m| f(m) * m.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };
        let weighted_avg = ClassMetrics {
            precision: weight(|m| m.precision),
            recall: weight(|m| m.recall),
            f1: weight(|m| m.f1),
            support: total,
        };

        Self {
            accuracy: ratio(correct, total),
            confusion,
            per_class,
            macro_avg,
            weighted_avg,
        }
    }

    pub fn class(&self, label: Label) -> &ClassMetrics {
        &self.per_class[label.index()]
    }

    pub fn total(&self) -> usize {
        self.macro_avg.support
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics| {
            writeln!(
                f,
                "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, m.precision, m.recall, m.f1, m.support
            )
        };

        writeln!(
            f,
            "{:>14} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for label in Label::ALL {
            row(f, label.as_str(), self.class(label))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.total()
        )?;
        row(f, "macro avg", &self.macro_avg)?;
        row(f, "weighted avg", &self.weighted_avg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label::{Ham, Spam};

    #[test]
    fn test_compute() {
        let actual = [Ham, Ham, Ham, Spam, Spam];
        let predicted = [Ham, Ham, Spam, Spam, Ham];
        let report = EvaluationReport::compute(&actual, &predicted);

        assert!((report.accuracy - 0.6).abs() < 1e-12);
        assert_eq!(report.confusion, [[2, 1], [1, 1]]);

        let ham = report.class(Ham);
        assert!((ham.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((ham.recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(ham.support, 3);

        let spam = report.class(Spam);
        assert!((spam.precision - 0.5).abs() < 1e-12);
        assert!((spam.recall - 0.5).abs() < 1e-12);
        assert!((spam.f1 - 0.5).abs() < 1e-12);

        assert!((report.weighted_avg.recall - 0.6).abs() < 1e-12);
        assert_eq!(report.total(), 5);
    }

    #[test]
    fn test_zero_division_is_zero() {
        let report = EvaluationReport::compute(&[Ham, Ham], &[Ham, Ham]);
        assert_eq!(report.accuracy, 1.0);
        let spam = report.class(Spam);
        assert_eq!(spam.precision, 0.0);
        assert_eq!(spam.recall, 0.0);
        assert_eq!(spam.f1, 0.0);
        assert_eq!(spam.support, 0);
    }

    #[test]
    fn test_display_contains_rows() {
        let report = EvaluationReport::compute(&[Ham, Spam], &[Ham, Spam]);
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("ham"));
        assert!(text.contains("spam"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("1.00"));
    }
}
