//! Multinomial Naive Bayes over TF-IDF weights
//!
//! Parameters are stored as logs: `class_log_prior[c] = ln P(c)` and
//! `feature_log_prob[c][t] = ln P(t|c)` with additive smoothing, so every
//! conditional is strictly positive.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sparse::SparseVector;
use crate::error::{Result, SpamError};
use crate::types::{Classification, Label};

/// Fitted multinomial Naive Bayes model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    n_features: usize,
    /// Training rows per class
    class_count: [usize; Label::COUNT],
    /// Per class, summed feature weights over its training rows
    feature_count: Vec<Vec<f64>>,
    class_log_prior: [f64; Label::COUNT],
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on feature vectors and their labels with smoothing constant `alpha`
    pub fn fit(vectors: &[SparseVector], labels: &[Label], alpha: f64) -> Result<Self> {
        if vectors.len() != labels.len() {
            return Err(SpamError::LengthMismatch {
                vectors: vectors.len(),
                labels: labels.len(),
            });
        }
        if vectors.is_empty() {
            return Err(SpamError::EmptyCorpus);
        }
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(SpamError::Config(format!(
                "alpha must be a positive number, got {}",
                alpha
            )));
        }

        let n_features = vectors[0].dim();
        let mut class_count = [0usize; Label::COUNT];
        let mut feature_count = vec![vec![0.0; n_features]; Label::COUNT];

        for (vector, label) in vectors.iter().zip(labels) {
            if vector.dim() != n_features {
                return Err(SpamError::DimensionMismatch {
                    expected: n_features,
                    actual: vector.dim(),
                });
            }
            let c = label.index();
            class_count[c] += 1;
            for (i, w) in vector.iter() {
                feature_count[c][i] += w;
            }
        }

        if let Some(missing) = Label::ALL.into_iter().find(|l| class_count[l.index()] == 0) {
            return Err(SpamError::MissingClass(missing));
        }

        let (class_log_prior, feature_log_prob) =
            log_parameters(&class_count, &feature_count, alpha, n_features);

        debug!(
            "Fitted classifier: {} features, class counts {:?}",
            n_features, class_count
        );

        Ok(Self {
            alpha,
            n_features,
            class_count,
            feature_count,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Unnormalized joint log-likelihood per class
    pub fn predict_log_scores(&self, x: &SparseVector) -> Result<[f64; Label::COUNT]> {
        self.check_dim(x)?;

        let mut scores = self.class_log_prior;
        for (c, score) in scores.iter_mut().enumerate() {
            *score += x
                .iter()
                .map(|(i, w)| w * self.feature_log_prob[c][i])
                .sum::<f64>();
        }
        Ok(scores)
    }

    /// Posterior distribution over classes, via log-sum-exp
    pub fn predict_proba(&self, x: &SparseVector) -> Result<[f64; Label::COUNT]> {
        Ok(softmax(self.predict_log_scores(x)?))
    }

    /// Most probable class and the full distribution. Ties go to the lower
    /// class index.
    pub fn predict(&self, x: &SparseVector) -> Result<Classification> {
        let probabilities = self.predict_proba(x)?;

        let mut best = 0;
        for c in 1..Label::COUNT {
            if probabilities[c] > probabilities[best] {
                best = c;
            }
        }

        let label = Label::from_index(best).unwrap_or(Label::Ham);
        Ok(Classification::new(label, probabilities))
    }

    pub fn predict_batch(&self, xs: &[SparseVector]) -> Result<Vec<Classification>> {
        xs.iter().map(|x| self.predict(x)).collect()
    }

    fn check_dim(&self, x: &SparseVector) -> Result<()> {
        if x.dim() != self.n_features {
            return Err(SpamError::DimensionMismatch {
                expected: self.n_features,
                actual: x.dim(),
            });
        }
        Ok(())
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn class_count(&self, label: Label) -> usize {
        self.class_count[label.index()]
    }

    /// P(c)
    pub fn class_prior(&self, label: Label) -> f64 {
        self.class_log_prior[label.index()].exp()
    }

    /// P(t|c) for vocabulary index `index`
    pub fn conditional(&self, label: Label, index: usize) -> Option<f64> {
        self.feature_log_prob[label.index()]
            .get(index)
            .map(|lp| lp.exp())
    }

    /// Check the invariants a deserialized model must satisfy
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.feature_log_prob.len() != Label::COUNT || self.feature_count.len() != Label::COUNT
        {
            return Err("wrong number of classes".to_string());
        }
        for c in 0..Label::COUNT {
            if self.feature_log_prob[c].len() != self.n_features
                || self.feature_count[c].len() != self.n_features
            {
                return Err(format!("class {} has wrong feature count", c));
            }
            if self.feature_log_prob[c].iter().any(|lp| !lp.is_finite()) {
                return Err(format!("class {} has non-finite log probabilities", c));
            }
        }
        if self.class_log_prior.iter().any(|lp| !lp.is_finite()) {
            return Err("non-finite class prior".to_string());
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err("alpha must be positive".to_string());
        }
        if self.class_count.iter().any(|&n| n == 0) {
            return Err("every class needs at least one training row".to_string());
        }
        if self
            .feature_count
            .iter()
            .flatten()
            .any(|&w| !w.is_finite() || w < 0.0)
        {
            return Err("feature counts must be finite and non-negative".to_string());
        }

        // The log parameters are stored for speed; they must follow from the counts
        let (class_log_prior, feature_log_prob) = log_parameters(
            &self.class_count,
            &self.feature_count,
            self.alpha,
            self.n_features,
        );
        let close = |a: f64, b: f64| (a - b).abs() <= 1e-9;
        if !class_log_prior
            .iter()
            .zip(&self.class_log_prior)
            .all(|(&a, &b)| close(a, b))
        {
            return Err("class priors do not match class counts".to_string());
        }
        if !feature_log_prob
            .iter()
            .flatten()
            .zip(self.feature_log_prob.iter().flatten())
            .all(|(&a, &b)| close(a, b))
        {
            return Err("conditionals do not match feature counts".to_string());
        }
        Ok(())
    }
}

/// Log priors from class counts and smoothed log conditionals from feature counts
fn log_parameters(
    class_count: &[usize; Label::COUNT],
    feature_count: &[Vec<f64>],
    alpha: f64,
    n_features: usize,
) -> ([f64; Label::COUNT], Vec<Vec<f64>>) {
    let total = class_count.iter().sum::<usize>() as f64;
    let class_log_prior = (*class_count).map(|n| (n as f64 / total).ln());

    let feature_log_prob = feature_count
        .iter()
        .map(|counts| {
            let denominator = (counts.iter().sum::<f64>() + alpha * n_features as f64).ln();
            counts
                .iter()
                .map(|&count| (count + alpha).ln() - denominator)
                .collect()
        })
        .collect();

    (class_log_prior, feature_log_prob)
}

/// Normalize log-scores to probabilities, shifting by the max first
pub fn softmax<const N: usize>(scores: [f64; N]) -> [f64; N] {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut probs = scores.map(|s| (s - max).exp());
    let sum: f64 = probs.iter().sum();
    for p in &mut probs {
        *p /= sum;
    }
    probs
}
