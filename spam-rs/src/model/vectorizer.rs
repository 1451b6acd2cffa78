//! TF-IDF vectorizer
//!
//! Learns a vocabulary and smoothed inverse document frequencies from a
//! corpus, then turns text into L2-normalized TF-IDF vectors.
//!
//! Vocabulary indices follow the sorted order of the terms, so fitting the
//! same corpus twice yields the same indices and the same artifact bytes.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::sparse::SparseVector;
use crate::error::{Result, SpamError};
use crate::text::{Tokenizer, TokenizerSettings};

/// Fitted TF-IDF vectorizer. Immutable once built.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    document_frequency: Vec<usize>,
    idf: Vec<f64>,
    n_documents: usize,
    fingerprint: String,
}

/// Serializable state of a fitted vectorizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerState {
    pub tokenizer: TokenizerSettings,
    /// Terms in index order
    pub terms: Vec<String>,
    pub document_frequency: Vec<usize>,
    pub idf: Vec<f64>,
    pub n_documents: usize,
}

/// Smoothed inverse document frequency, always > 0
pub fn smoothed_idf(n_documents: usize, document_frequency: usize) -> f64 {
    ((1.0 + n_documents as f64) / (1.0 + document_frequency as f64)).ln() + 1.0
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from `documents`
    pub fn fit<S: AsRef<str>>(tokenizer: Tokenizer, documents: &[S]) -> Result<Self> {
        if documents.is_empty() {
            return Err(SpamError::EmptyCorpus);
        }

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let distinct: BTreeSet<String> = tokenizer.tokenize(doc.as_ref()).into_iter().collect();
            for term in distinct {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(SpamError::EmptyVocabulary);
        }

        let n_documents = documents.len();
        let (terms, document_frequency): (Vec<String>, Vec<usize>) = doc_freq.into_iter().unzip();
        let idf = document_frequency
            .iter()
            .map(|&df| smoothed_idf(n_documents, df))
            .collect();

        debug!(
            "Fitted vectorizer: {} documents, {} terms",
            n_documents,
            terms.len()
        );

        Ok(Self::assemble(
            tokenizer,
            terms,
            document_frequency,
            idf,
            n_documents,
        ))
    }

    /// Fit on `documents` and return their vectors as well
    pub fn fit_transform<S: AsRef<str>>(
        tokenizer: Tokenizer,
        documents: &[S],
    ) -> Result<(Self, Vec<SparseVector>)> {
        let vectorizer = Self::fit(tokenizer, documents)?;
        let vectors = vectorizer.transform(documents);
        Ok((vectorizer, vectors))
    }

    fn assemble(
        tokenizer: Tokenizer,
        terms: Vec<String>,
        document_frequency: Vec<usize>,
        idf: Vec<f64>,
        n_documents: usize,
    ) -> Self {
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let fingerprint = fingerprint(&tokenizer.settings(), &terms, &document_frequency, n_documents);

        Self {
            tokenizer,
            vocabulary,
            terms,
            document_frequency,
            idf,
            n_documents,
            fingerprint,
        }
    }

    /// Vectorize one document. Unknown terms are ignored.
    pub fn transform_one(&self, document: &str) -> SparseVector {
        let mut tf: BTreeMap<usize, f64> = BTreeMap::new();
        for token in self.tokenizer.tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *tf.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_pairs(
            self.terms.len(),
            tf.into_iter().map(|(i, count)| (i, count * self.idf[i])),
        );
        vector.normalize();
        vector
    }

    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|doc| self.transform_one(doc.as_ref()))
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index_of(term).map(|i| self.idf[i])
    }

    pub fn document_frequency(&self, term: &str) -> Option<usize> {
        self.index_of(term).map(|i| self.document_frequency[i])
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Content hash identifying this fitted state
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn to_state(&self) -> VectorizerState {
        VectorizerState {
            tokenizer: self.tokenizer.settings(),
            terms: self.terms.clone(),
            document_frequency: self.document_frequency.clone(),
            idf: self.idf.clone(),
            n_documents: self.n_documents,
        }
    }

    /// Rebuild from persisted state, checking its internal consistency.
    /// Errors are plain strings; the artifact loader attaches the path.
    pub fn from_state(state: VectorizerState) -> std::result::Result<Self, String> {
        let n = state.terms.len();
        if n == 0 {
            return Err("empty vocabulary".to_string());
        }
        if state.document_frequency.len() != n || state.idf.len() != n {
            return Err(format!(
                "length mismatch: {} terms, {} document frequencies, {} idf weights",
                n,
                state.document_frequency.len(),
                state.idf.len()
            ));
        }
        if state.terms.windows(2).any(|w| w[0] >= w[1]) {
            return Err("terms are not sorted and unique".to_string());
        }
        if state
            .document_frequency
            .iter()
            .any(|&df| df == 0 || df > state.n_documents)
        {
            return Err("document frequency out of range".to_string());
        }
        if state.idf.iter().any(|&w| !w.is_finite() || w <= 0.0) {
            return Err("idf weights must be positive".to_string());
        }
        // idf is not part of the fingerprint, so it must be derivable from df and N
        if state
            .idf
            .iter()
            .zip(&state.document_frequency)
            .any(|(&w, &df)| (w - smoothed_idf(state.n_documents, df)).abs() > 1e-12)
        {
            return Err("idf weights do not match document frequencies".to_string());
        }

        let tokenizer = Tokenizer::from_settings(&state.tokenizer).map_err(|e| e.to_string())?;

        Ok(Self::assemble(
            tokenizer,
            state.terms,
            state.document_frequency,
            state.idf,
            state.n_documents,
        ))
    }
}

/// SHA-256 over tokenizer settings and fitted statistics, hex encoded
pub fn fingerprint(
    settings: &TokenizerSettings,
    terms: &[String],
    document_frequency: &[usize],
    n_documents: usize,
) -> String {
    fn field(hasher: &mut Sha256, bytes: &[u8]) {
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }

    let mut hasher = Sha256::new();
    field(&mut hasher, settings.token_pattern.as_bytes());
    hasher.update([settings.lowercase as u8]);
    hasher.update((settings.stop_words.len() as u64).to_le_bytes());
    for word in &settings.stop_words {
        field(&mut hasher, word.as_bytes());
    }
    hasher.update((n_documents as u64).to_le_bytes());
    hasher.update((terms.len() as u64).to_le_bytes());
    for (term, df) in terms.iter().zip(document_frequency) {
        field(&mut hasher, term.as_bytes());
        hasher.update((*df as u64).to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StopWords;

    fn corpus() -> Vec<&'static str> {
        vec![
            "Win a free prize now",
            "Meeting moved to Monday",
            "free free FREE tickets",
        ]
    }

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        assert_eq!(
            v.terms(),
            &["free", "meeting", "monday", "moved", "prize", "tickets", "win"]
        );
        assert_eq!(v.index_of("free"), Some(0));
        assert_eq!(v.term(6), Some("win"));
        assert_eq!(v.index_of("the"), None);
        assert_eq!(v.document_frequency("free"), Some(2));
        assert_eq!(v.n_documents(), 3);
    }

    #[test]
    fn test_idf_formula() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        let expected_free = (4.0f64 / 3.0).ln() + 1.0;
        let expected_win = (4.0f64 / 2.0).ln() + 1.0;
        assert!((v.idf("free").unwrap() - expected_free).abs() < 1e-12);
        assert!((v.idf("win").unwrap() - expected_win).abs() < 1e-12);
        assert!(v.terms().iter().all(|t| v.idf(t).unwrap() > 0.0));
    }

    #[test]
    fn test_transform_is_l2_normalized_tfidf() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        let x = v.transform_one("free free win");

        let free = 2.0 * v.idf("free").unwrap();
        let win = v.idf("win").unwrap();
        let norm = (free * free + win * win).sqrt();

        assert_eq!(x.dim(), v.vocabulary_size());
        assert!((x.get(0) - free / norm).abs() < 1e-12);
        assert!((x.get(6) - win / norm).abs() < 1e-12);
        assert!((x.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        let x = v.transform_one("zzqxw nonsense gibberish");
        assert!(x.is_zero());
        assert_eq!(x.dim(), v.vocabulary_size());

        let empty = v.transform_one("");
        assert!(empty.is_zero());
    }

    #[test]
    fn test_transform_is_idempotent() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        let a = v.transform_one("Free prize, win win win!");
        let b = v.transform_one("Free prize, win win win!");
        let bits = |x: &SparseVector| x.iter().map(|(i, w)| (i, w.to_bits())).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_fit_empty_corpus() {
        let docs: Vec<&str> = Vec::new();
        assert!(matches!(
            TfidfVectorizer::fit(Tokenizer::default(), &docs),
            Err(SpamError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_fit_only_stop_words() {
        assert!(matches!(
            TfidfVectorizer::fit(Tokenizer::default(), &["the and is", "", "a"]),
            Err(SpamError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_state_roundtrip_preserves_fingerprint() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        let restored = TfidfVectorizer::from_state(v.to_state()).unwrap();
        assert_eq!(restored.fingerprint(), v.fingerprint());
        assert_eq!(restored.transform_one("free win"), v.transform_one("free win"));
    }

    #[test]
    fn test_fingerprint_depends_on_corpus_and_settings() {
        let a = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        let b = TfidfVectorizer::fit(Tokenizer::default(), &["free prize", "meeting"]).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());

        let no_stop = Tokenizer::new(r"(?u)\b\w\w+\b", true, StopWords::none()).unwrap();
        let c = TfidfVectorizer::fit(no_stop, &corpus()).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());

        let again = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();
        assert_eq!(a.fingerprint(), again.fingerprint());
    }

    #[test]
    fn test_from_state_rejects_inconsistent_state() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();

        let mut state = v.to_state();
        state.idf.pop();
        assert!(TfidfVectorizer::from_state(state).is_err());

        let mut state = v.to_state();
        state.terms.swap(0, 1);
        assert!(TfidfVectorizer::from_state(state).is_err());

        let mut state = v.to_state();
        state.idf[0] = 0.0;
        assert!(TfidfVectorizer::from_state(state).is_err());
    }

    #[test]
    fn test_from_state_rejects_rewritten_idf() {
        let v = TfidfVectorizer::fit(Tokenizer::default(), &corpus()).unwrap();

        // positive and finite, but not what df and N imply
        let mut state = v.to_state();
        state.idf.iter_mut().for_each(|w| *w = 7.5);
        let err = TfidfVectorizer::from_state(state).unwrap_err();
        assert!(err.contains("idf"));

        let mut state = v.to_state();
        state.idf[3] *= 2.0;
        assert!(TfidfVectorizer::from_state(state).is_err());
    }
}
