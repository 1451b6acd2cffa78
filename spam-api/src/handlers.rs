//! API request handlers

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use spam_rs::{ArtifactPaths, HealthStatus, Predictor};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ApiError, Result};

/// Shared application state
pub struct AppState {
    pub predictor: Arc<Predictor>,
    /// Where `/admin/reload` reads artifacts from
    pub artifacts: ArtifactPaths,
}

/// Classification response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// "Spam" or "Not Spam"
    pub prediction: &'static str,
    /// Winning class probability as a percentage, two decimals
    pub probability: f64,
    pub is_spam: bool,
}

/// Reload response
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Extract the `message` string from a JSON object body
fn parse_message(body: &[u8]) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedRequest)?;

    value
        .as_object()
        .and_then(|obj| obj.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .ok_or(ApiError::MalformedRequest)
}

/// POST /predict - Classify a single message
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>> {
    if !state.predictor.is_ready() {
        return Err(ApiError::ModelNotTrained);
    }

    let message = parse_message(&body)?;
    let result = state.predictor.classify(&message)?;
    debug!(
        "Classified {} chars as {} ({:.4})",
        message.len(),
        result.label,
        result.probability
    );

    Ok(Json(PredictResponse {
        prediction: result.display_label(),
        probability: result.percent(),
        is_spam: result.is_spam,
    }))
}

/// GET /health - Always 200
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.predictor.health())
}

/// POST /admin/reload - Re-read artifacts and swap them in
pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Json<ReloadResponse>> {
    info!("Reloading model artifacts");

    let predictor = Arc::clone(&state.predictor);
    let paths = state.artifacts.clone();
    tokio::task::spawn_blocking(move || predictor.reload(&paths))
        .await?
        .map_err(ApiError::Reload)?;

    Ok(Json(ReloadResponse {
        status: "reloaded",
        model_loaded: state.predictor.is_ready(),
    }))
}
