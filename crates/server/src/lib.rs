//! Server crate for the CineCase recommendation engine.
//!
//! This crate wires the catalog and the preference pipeline into a
//! long-running service:
//! - `orchestrator`: the `RecommendationService` that runs a request end to end
//! - `feedback`: the JSON-file feedback store
//! - `api`: the axum router and handlers
//! - `config`: command-line / environment configuration

pub mod api;
pub mod config;
pub mod feedback;
pub mod orchestrator;

pub use api::{create_router, AppError, AppState};
pub use config::ServerConfig;
pub use feedback::{FeedbackRecord, FeedbackStore, FeedbackStoreError, MovieDetails};
pub use orchestrator::{RecommendationService, RevisedMovie};
