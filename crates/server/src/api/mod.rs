//! HTTP API for recommendations and feedback.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{AppError, AppResult};
pub use handlers::{CatalogSummary, RecommendationResponse};
pub use routes::create_router;
pub use state::AppState;
