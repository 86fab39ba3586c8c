//! Filter for the requested vote-average window.

use crate::preferences::UserPreferences;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use tracing::warn;

/// Keeps movies whose vote average falls in the requested window.
///
/// ## Algorithm
/// - `LOW-HIGH` keeps `LOW <= vote_average <= HIGH`
/// - a single value `v` keeps `v <= vote_average < min(v + 1, 10.1)`
/// - A malformed rating is logged and ignored
pub struct RatingFilter;

impl Filter for RatingFilter {
    fn name(&self) -> &str {
        "RatingFilter"
    }

    fn apply<'a>(
        &self,
        movies: Vec<&'a Movie>,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>> {
        let range = match preferences.rating_range() {
            None => return Ok(movies),
            Some(Err(e)) => {
                warn!("{}", e);
                return Ok(movies);
            }
            Some(Ok(range)) => range,
        };

        let filtered: Vec<&Movie> = movies
            .into_iter()
            .filter(|movie| range.contains(movie.vote_average))
            .collect();
        Ok(filtered)
    }
}
