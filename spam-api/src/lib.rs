//! spam-api: HTTP front end for the spam classifier
//!
//! # Endpoints
//!
//! - `POST /predict` with `{"message": "..."}` returns
//!   `{"prediction": "Spam" | "Not Spam", "probability": 97.31, "is_spam": true}`
//! - `GET /health` returns `{"status": "healthy", "model_loaded": true}`
//! - `POST /admin/reload` re-reads the artifacts from disk (only with
//!   `[server] enable_admin = true`)
//!
//! The service starts even when no trained artifacts exist; `/predict` then
//! answers 503 until a model is trained and reloaded.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use server::ApiServer;
