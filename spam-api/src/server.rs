//! API Server - HTTP server for classification requests

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use spam_rs::Predictor;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::handlers::{self, AppState};

/// API server
pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a server around an already constructed predictor
    pub fn new(config: ApiConfig, predictor: Arc<Predictor>) -> Self {
        let state = Arc::new(AppState {
            predictor,
            artifacts: config.artifacts.clone(),
        });

        Self { config, state }
    }

    fn cors(&self) -> CorsLayer {
        let origin = if self.config.cors.allow_any_origin {
            AllowOrigin::from(Any)
        } else {
            let origins: Vec<HeaderValue> = self
                .config
                .cors
                .allowed_origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin {}", o);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Build the router. `/admin/reload` is only mounted when
    /// `server.enable_admin` is set.
    pub fn router(&self) -> Router {
        let mut routes = Router::new()
            .route("/predict", post(handlers::predict))
            .route("/health", get(handlers::health));
        if self.config.server.enable_admin {
            routes = routes.route("/admin/reload", post(handlers::reload));
        }

        routes
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.server.request_timeout_seconds,
            )))
            .layer(self.cors())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the API server; returns after Ctrl-C
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();
        let addr = &self.config.server.listen_addr;

        info!("Starting API server on {}", addr);
        info!("  Model loaded: {}", self.state.predictor.is_ready());
        if self.config.server.enable_admin {
            warn!("  Admin endpoint /admin/reload is enabled and unauthenticated");
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
