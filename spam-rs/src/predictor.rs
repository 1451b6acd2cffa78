//! Serving-side predictor
//!
//! Holds an optional [`TrainedModel`] behind a lock. Requests take a cheap
//! `Arc` snapshot and classify without holding the lock, so concurrent
//! calls never block each other. Reloading swaps the whole pair at once.

use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::config::ArtifactPaths;
use crate::error::{Result, SpamError};
use crate::model::TrainedModel;
use crate::types::Classification;

/// Health snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Classifier service shared across request handlers
#[derive(Debug, Default)]
pub struct Predictor {
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl Predictor {
    /// Predictor with no model (Unready)
    pub fn new() -> Self {
        Self::default()
    }

    /// Predictor serving `model` (Ready)
    pub fn from_model(model: TrainedModel) -> Self {
        Self {
            model: RwLock::new(Some(Arc::new(model))),
        }
    }

    /// Try to load artifacts from `paths`. Never fails: when loading does not
    /// succeed the predictor starts Unready and the reason is logged.
    pub fn load(paths: &ArtifactPaths) -> Self {
        if !paths.vectorizer_path.exists() || !paths.model_path.exists() {
            warn!(
                "Artifacts not found ({}, {}); serving without a model",
                paths.vectorizer_path.display(),
                paths.model_path.display()
            );
            return Self::new();
        }

        match TrainedModel::load(paths) {
            Ok(model) => Self::from_model(model),
            Err(e) => {
                warn!("Failed to load model: {}; serving without a model", e);
                Self::new()
            }
        }
    }

    /// Load artifacts from `paths` and swap them in. On failure the current
    /// model, if any, stays in place.
    pub fn reload(&self, paths: &ArtifactPaths) -> Result<()> {
        let model = TrainedModel::load(paths)?;
        self.replace(model);
        info!("Model reloaded");
        Ok(())
    }

    /// Swap in an already fitted model
    pub fn replace(&self, model: TrainedModel) {
        let mut slot = self.model.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(model));
    }

    fn snapshot(&self) -> Option<Arc<TrainedModel>> {
        self.model
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Classify one message. Fails with `ModelNotTrained` while Unready.
    pub fn classify(&self, message: &str) -> Result<Classification> {
        let model = self.snapshot().ok_or(SpamError::ModelNotTrained)?;
        model.classify(message)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            model_loaded: self.is_ready(),
        }
    }
}
