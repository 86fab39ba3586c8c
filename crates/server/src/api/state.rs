use std::sync::Arc;

use crate::feedback::FeedbackStore;
use crate::orchestrator::RecommendationService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: RecommendationService,
    pub feedback: Arc<FeedbackStore>,
}

impl AppState {
    pub fn new(service: RecommendationService, feedback: FeedbackStore) -> Self {
        Self {
            service,
            feedback: Arc::new(feedback),
        }
    }
}
