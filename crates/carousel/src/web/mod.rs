//! Web form: one page to enter topic, audience, and tone, one page of results.

mod handlers;
mod templates;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use carousel_core::{CarouselGenerator, Config, Tone};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<CarouselGenerator>,
    pub brand: String,
    pub default_tone: Tone,
}

impl AppState {
    pub fn new(generator: CarouselGenerator, config: &Config) -> Self {
        Self {
            generator: Arc::new(generator),
            brand: config.carousel.brand.clone(),
            default_tone: config.carousel.default_tone,
        }
    }
}

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/generate", post(handlers::generate))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind` and serve until the process is stopped.
pub async fn serve(bind: &str, state: AppState, max_body_bytes: usize) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {bind}: {e}"))?;
    let addr = listener.local_addr()?;

    tracing::info!("Carousel form listening on http://{addr}");
    tracing::info!("Health check: http://{addr}/health");

    axum::serve(listener, router(state, max_body_bytes)).await?;
    Ok(())
}
