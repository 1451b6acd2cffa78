//! Persisted artifacts
//!
//! Each fitted component is stored as a JSON envelope:
//!
//! ```json
//! { "format": "spam-rs/vectorizer", "version": 1, "fingerprint": "…", "payload": { … } }
//! ```
//!
//! The vectorizer's fingerprint is recomputed on load and must match. The
//! classifier envelope carries the fingerprint of the vectorizer it was
//! trained against, which ties the two files to one training run.
//! Derived weights (idf, log priors, log conditionals) are recomputed from
//! the stored counts on load and must agree with the stored values.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::classifier::MultinomialNb;
use super::vectorizer::{TfidfVectorizer, VectorizerState};
use crate::error::{Result, SpamError};

pub const VECTORIZER_FORMAT: &str = "spam-rs/vectorizer";
pub const CLASSIFIER_FORMAT: &str = "spam-rs/classifier";
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    format: String,
    version: u32,
    fingerprint: String,
    payload: T,
}

/// Write `bytes` next to `path` and rename into place, so readers never see
/// a partially written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = PathBuf::from(tmp);

    fs::write(&tmp_path, bytes)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn save<T: Serialize>(path: &Path, format: &str, fingerprint: &str, payload: &T) -> Result<()> {
    let envelope = Envelope {
        format: format.to_string(),
        version: ARTIFACT_VERSION,
        fingerprint: fingerprint.to_string(),
        payload,
    };
    let bytes = serde_json::to_vec(&envelope)?;
    write_atomic(path, &bytes)?;
    info!("Saved {} to {}", format, path.display());
    Ok(())
}

fn load<T: DeserializeOwned>(path: &Path, format: &str) -> Result<(String, T)> {
    let bytes = fs::read(path)?;
    let corrupt = |reason: String| SpamError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    };

    let envelope: Envelope<T> =
        serde_json::from_slice(&bytes).map_err(|e| corrupt(format!("invalid JSON: {}", e)))?;

    if envelope.format != format {
        return Err(corrupt(format!(
            "expected format '{}', found '{}'",
            format, envelope.format
        )));
    }
    if envelope.version != ARTIFACT_VERSION {
        return Err(corrupt(format!(
            "unsupported version {} (expected {})",
            envelope.version, ARTIFACT_VERSION
        )));
    }

    Ok((envelope.fingerprint, envelope.payload))
}

pub fn save_vectorizer(path: &Path, vectorizer: &TfidfVectorizer) -> Result<()> {
    save(
        path,
        VECTORIZER_FORMAT,
        vectorizer.fingerprint(),
        &vectorizer.to_state(),
    )
}

pub fn load_vectorizer(path: &Path) -> Result<TfidfVectorizer> {
    let (fingerprint, state) = load::<VectorizerState>(path, VECTORIZER_FORMAT)?;
    let corrupt = |reason: String| SpamError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    };

    let vectorizer = TfidfVectorizer::from_state(state).map_err(corrupt)?;
    if vectorizer.fingerprint() != fingerprint {
        return Err(corrupt("fingerprint does not match contents".to_string()));
    }
    Ok(vectorizer)
}

/// Save a classifier tagged with the fingerprint of its vectorizer
pub fn save_classifier(
    path: &Path,
    classifier: &MultinomialNb,
    vectorizer_fingerprint: &str,
) -> Result<()> {
    save(path, CLASSIFIER_FORMAT, vectorizer_fingerprint, classifier)
}

/// Load a classifier and the vectorizer fingerprint it was tagged with
pub fn load_classifier(path: &Path) -> Result<(MultinomialNb, String)> {
    let (fingerprint, classifier) = load::<MultinomialNb>(path, CLASSIFIER_FORMAT)?;
    classifier.validate().map_err(|reason| SpamError::CorruptArtifact {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok((classifier, fingerprint))
}
