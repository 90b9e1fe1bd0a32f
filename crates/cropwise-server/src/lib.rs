//! REST API over the crop prediction service.

pub mod error;
pub mod handlers;
pub mod identity;

use axum::{
    routing::{get, post},
    Router,
};
use cropwise_core::error::CropwiseError;
use cropwise_core::PredictionService;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/predict", post(handlers::predict))
        .route("/api/predict/locate", post(handlers::predict_at_location))
        .route("/api/weather", post(handlers::weather))
        .route("/api/history", get(handlers::history))
        .route("/api/crops", get(handlers::crops))
        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), CropwiseError> {
    tracing::info!(
        crops = state.service.table().crops.len(),
        weather = state.service.weather_backend(),
        "starting API server"
    );

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
    }
}
