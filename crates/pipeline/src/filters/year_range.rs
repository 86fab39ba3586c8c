//! Filter for the requested release-year window.

use crate::preferences::UserPreferences;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use tracing::warn;

/// Keeps movies released inside the requested window.
///
/// ## Algorithm
/// - `>=YEAR` keeps `year >= YEAR`
/// - `START-END` keeps `START <= year <= END`
/// - A malformed window is logged and ignored
pub struct YearRangeFilter;

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn apply<'a>(
        &self,
        movies: Vec<&'a Movie>,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>> {
        let range = match preferences.year_range() {
            None => return Ok(movies),
            Some(Err(e)) => {
                warn!("{}", e);
                return Ok(movies);
            }
            Some(Ok(range)) => range,
        };

        let filtered: Vec<&Movie> = movies
            .into_iter()
            .filter(|movie| range.contains(movie.year))
            .collect();
        Ok(filtered)
    }
}
