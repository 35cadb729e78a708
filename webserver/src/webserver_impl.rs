//! Main webserver implementation
//!
//! Holds the extraction engine behind a trait seam and wires it into an
//! axum router. All request/response mapping lives here; extraction
//! semantics stay in the extractor crate.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::types::{ExtractResponse, HealthResponse, StatusResponse};
use extractor::ExtractionEngine;
use shared::ExtractionRequest;

pub struct WebServer<E: ExtractionEngine> {
    engine: Arc<E>,
    state: Arc<AppState>,
}

// manual impl: derive(Clone) would demand E: Clone
impl<E: ExtractionEngine> Clone for WebServer<E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            state: self.state.clone(),
        }
    }
}

impl<E: ExtractionEngine + 'static> WebServer<E> {
    pub fn new(engine: E, state: AppState) -> Self {
        Self {
            engine: Arc::new(engine),
            state: Arc::new(state),
        }
    }

    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/api/extract", post(extract_handler::<E>))
            .route("/api/status", get(status_handler::<E>))
            .route("/health", get(health_handler::<E>))
            .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
            .with_state(self.clone())
    }

    /// Serve until ctrl-c
    pub async fn run(&self, bind_address: SocketAddr) -> WebServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| {
                WebServerError::startup(format!("failed to bind {bind_address}: {e}"))
            })?;

        info!(%bind_address, "HTTP server listening");

        let server = axum::serve(listener, router);
        tokio::select! {
            result = server => {
                result.map_err(|e| WebServerError::startup(format!("server error: {e}")))?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
            }
        }

        Ok(())
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }
}

async fn extract_handler<E: ExtractionEngine + 'static>(
    State(server): State<WebServer<E>>,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<ExtractResponse>, WebServerError> {
    server.state.record_request();
    request.validate()?;

    info!(
        business = %request.business_name,
        phase = %request.phase(),
        content_len = request.website_content.len(),
        "extraction requested"
    );

    match server.engine.extract(request).await {
        Ok(outcome) => {
            server.state.record_success();
            Ok(Json(ExtractResponse::from(outcome)))
        }
        Err(err) => {
            server.state.record_failure();
            warn!(class = err.class(), "extraction failed");
            Err(err.into())
        }
    }
}

async fn status_handler<E: ExtractionEngine + 'static>(
    State(server): State<WebServer<E>>,
) -> Json<StatusResponse> {
    let state = &server.state;
    Json(StatusResponse {
        status: "running",
        uptime_seconds: state.uptime_seconds(),
        total_requests: state.total_requests(),
        successful_extractions: state.successful_extractions(),
        failed_extractions: state.failed_extractions(),
        provider_key_count: state.key_count,
        providers: state.providers.clone(),
    })
}

async fn health_handler<E: ExtractionEngine + 'static>(
    State(server): State<WebServer<E>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        uptime_seconds: server.state.uptime_seconds(),
        timestamp: chrono::Utc::now(),
    })
}
