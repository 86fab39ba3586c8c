//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{DurationFilter, GenreFilter, RatingFilter, YearRangeFilter};
use crate::preferences::UserPreferences;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::{Movie, MovieCatalog};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::standard();
/// let matches = pipeline.filter_catalog(&catalog, &preferences)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The pipeline used for recommendations: genre, year range, rating, duration.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(GenreFilter)
            .add_filter(YearRangeFilter)
            .add_filter(RatingFilter)
            .add_filter(DurationFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence.
    ///
    /// # Returns
    /// * `Ok(Vec<&Movie>)` - The movies that passed every filter, in input order
    /// * `Err` - If any filter fails
    pub fn apply<'a>(
        &self,
        movies: Vec<&'a Movie>,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>> {
        let mut current = movies;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, preferences)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }

    /// Run the pipeline over every movie in the catalog.
    pub fn filter_catalog<'a>(
        &self,
        catalog: &'a MovieCatalog,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>> {
        self.apply(catalog.movies().iter().collect(), preferences)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{movie, titles};

    fn create_test_catalog() -> MovieCatalog {
        MovieCatalog::from_movies(vec![
            movie("Heat", "Action", 7.7, 170, 1995),
            movie("Speed", "Action", 7.1, 116, 1994),
            movie("Se7en", "Crime", 8.1, 127, 1995),
            movie("Arrival", "Drama", 7.6, 116, 2016),
        ])
    }

    #[test]
    fn test_empty_pipeline() {
        let catalog = create_test_catalog();
        let prefs = UserPreferences::new().with_genre("Action");

        let filtered = FilterPipeline::new().filter_catalog(&catalog, &prefs).unwrap();
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_standard_pipeline_without_preferences_is_identity() {
        let catalog = create_test_catalog();

        let filtered = FilterPipeline::standard()
            .filter_catalog(&catalog, &UserPreferences::new())
            .unwrap();
        assert_eq!(titles(&filtered), vec!["Heat", "Speed", "Se7en", "Arrival"]);
    }

    #[test]
    fn test_standard_pipeline_combines_dimensions() {
        let catalog = create_test_catalog();
        let prefs = UserPreferences::new()
            .with_genre("Action")
            .with_rating("7")
            .with_duration("90")
            .with_year_range("1990-1999");

        let filtered = FilterPipeline::standard().filter_catalog(&catalog, &prefs).unwrap();
        assert_eq!(titles(&filtered), vec!["Speed"]);
    }

    #[test]
    fn test_single_filter() {
        let catalog = create_test_catalog();
        let prefs = UserPreferences::new().with_year_range(">=2000");

        let pipeline = FilterPipeline::new().add_filter(YearRangeFilter);
        let filtered = pipeline.filter_catalog(&catalog, &prefs).unwrap();
        assert_eq!(titles(&filtered), vec!["Arrival"]);
    }
}
