//! CineCase HTTP server.
//!
//! Loads the movie catalog once at start-up and serves recommendations and
//! feedback over HTTP. A missing or unreadable dataset does not stop the
//! server; recommendation requests are then answered with 503.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use data_loader::MovieCatalog;
use server::{create_router, AppState, FeedbackStore, RecommendationService, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();
    info!("Starting CineCase server with {:?}", config);

    info!("Loading movie catalog from {}", config.data_path.display());
    let catalog = match MovieCatalog::load_from_csv(&config.data_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Could not load movie catalog: {}. Serving an empty catalog.", e);
            MovieCatalog::new()
        }
    };
    let (min_year, max_year) = catalog.year_bounds();
    info!(
        "Catalog ready: {} movies, {} genres, years {}-{}",
        catalog.len(),
        catalog.genres().len(),
        min_year,
        max_year
    );

    let service = RecommendationService::new(Arc::new(catalog));
    let feedback = FeedbackStore::new(&config.feedback_path);
    let app = create_router(AppState::new(service, feedback));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
