//! # Recommendation Service
//!
//! This module runs a recommendation request end to end:
//! 1. Filter the catalog by the user's preferences
//! 2. Score the survivors by similarity
//! 3. Sort by rating then similarity
//! 4. Slice the requested page
//!
//! Filtering and ranking are CPU-bound, so they run on the blocking pool
//! and the async handlers stay responsive.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use data_loader::{Movie, MovieCatalog};
use pipeline::{CaseReviser, Feedback, FilterPipeline, RankedPage, Ranker, UserPreferences};

/// Result of revising a recommendation after feedback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevisedMovie {
    #[serde(flatten)]
    pub movie: Movie,
    /// True when a different movie replaced the original
    pub revised: bool,
}

/// Coordinates filtering, ranking and revision over one shared catalog.
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<MovieCatalog>,
    filter_pipeline: Arc<FilterPipeline>,
    ranker: Ranker,
    reviser: CaseReviser,
}

impl RecommendationService {
    /// Create a service with the standard filter pipeline and default ranker
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self::with_components(catalog, FilterPipeline::standard(), Ranker::default())
    }

    pub fn with_components(
        catalog: Arc<MovieCatalog>,
        filter_pipeline: FilterPipeline,
        ranker: Ranker,
    ) -> Self {
        let reviser = CaseReviser::new(catalog.clone());
        Self {
            catalog,
            filter_pipeline: Arc::new(filter_pipeline),
            ranker,
            reviser,
        }
    }

    pub fn catalog(&self) -> &Arc<MovieCatalog> {
        &self.catalog
    }

    /// Produce one page of recommendations.
    ///
    /// An empty page is a normal outcome (nothing matched, or the page is past
    /// the end). `Err` is reserved for failures inside the pipeline.
    pub async fn recommend(&self, preferences: UserPreferences, page: usize) -> Result<RankedPage> {
        let start_time = Instant::now();
        info!("Received preferences - {:?}, Page: {}", preferences, page);

        let service = self.clone();
        let ranked = tokio::task::spawn_blocking(move || service.recommend_blocking(&preferences, page))
            .await
            .context("Recommendation task panicked")??;

        info!(
            "Returning {} of {} matching movies for page {} in {:.2?}",
            ranked.recommendations.len(),
            ranked.total_matches,
            page,
            start_time.elapsed()
        );
        Ok(ranked)
    }

    /// Synchronous version of [`recommend`](Self::recommend), for callers
    /// outside a runtime.
    pub fn recommend_blocking(&self, preferences: &UserPreferences, page: usize) -> Result<RankedPage> {
        let filtered = self
            .filter_pipeline
            .filter_catalog(&self.catalog, preferences)
            .context("Failed to apply filters")?;
        info!("Filtering complete, {} movies remain", filtered.len());

        Ok(self.ranker.rank_and_page(filtered, preferences, page))
    }

    /// Apply feedback to the catalog movie with the given title.
    ///
    /// Returns `None` when the title is not in the catalog.
    pub fn revise(&self, feedback: &Feedback) -> Option<RevisedMovie> {
        let recommendation = self.catalog.get_by_title(&feedback.movie_title)?;
        let revision = self.reviser.revise(recommendation, feedback);

        Some(RevisedMovie {
            movie: revision.movie().clone(),
            revised: revision.is_substituted(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, genre: &str, vote_average: f64, runtime: u32, year: i32) -> Movie {
        Movie {
            id: 0,
            title: title.to_string(),
            main_genre: genre.to_string(),
            vote_average,
            runtime,
            year,
            overview: String::new(),
        }
    }

    fn build_test_service() -> RecommendationService {
        RecommendationService::new(Arc::new(MovieCatalog::from_movies(vec![
            movie("A", "Drama", 7.0, 100, 2015),
            movie("B", "Drama", 8.5, 110, 2018),
            movie("C", "Comedy", 6.0, 95, 2021),
        ])))
    }

    #[tokio::test]
    async fn test_recommend_filters_and_ranks() {
        let service = build_test_service();
        let prefs = UserPreferences::new().with_genre("Drama");

        let page = service.recommend(prefs, 1).await.unwrap();
        let titles: Vec<&str> = page.recommendations.iter().map(|r| r.movie.title.as_str()).collect();

        assert_eq!(titles, vec!["B", "A"]);
        assert_eq!(page.total_matches, 2);
    }

    #[tokio::test]
    async fn test_recommend_no_matches_is_empty_not_error() {
        let service = build_test_service();
        let prefs = UserPreferences::new().with_year_range(">=2030");

        let page = service.recommend(prefs, 1).await.unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_revise_by_title() {
        let service = build_test_service();

        let revised = service.revise(&Feedback::new("A", 2)).unwrap();
        assert!(revised.revised);
        assert_eq!(revised.movie.title, "B");

        let kept = service.revise(&Feedback::new("A", 5)).unwrap();
        assert!(!kept.revised);
        assert_eq!(kept.movie.title, "A");

        assert!(service.revise(&Feedback::new("Unknown", 1)).is_none());
    }
}
