//! HTTP surface of the service.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::{
    error::Result,
    generator::SoundscapeGenerator,
    models::{GenerateRequest, SoundscapeResponse},
};

/// Builds the router serving `POST /api/generate` and `GET /health`.
pub fn router(generator: SoundscapeGenerator) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/health", get(health))
        .with_state(Arc::new(generator))
}

/// Serves the router on `listener` until the process stops.
///
/// # Errors
///
/// Returns an error if the listener fails.
pub async fn serve(listener: TcpListener, generator: SoundscapeGenerator) -> Result<()> {
    axum::serve(listener, router(generator)).await?;
    Ok(())
}

async fn generate(
    State(generator): State<Arc<SoundscapeGenerator>>,
    body: Bytes,
) -> Result<Json<SoundscapeResponse>> {
    let request = GenerateRequest::from_json(&body).inspect_err(|err| {
        tracing::error!(error = %err, "could not read request body");
    })?;
    let prompt = request.prompt().inspect_err(|_| {
        tracing::warn!("rejected request without a valid prompt");
    })?;

    tracing::info!(%prompt, "received prompt");

    match generator.generate(prompt).await {
        Ok(response) => {
            tracing::info!(%prompt, "soundscape generated");
            Ok(Json(response))
        }
        Err(err) => {
            tracing::error!(%prompt, error = %err, "an unexpected error occurred");
            Err(err)
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
