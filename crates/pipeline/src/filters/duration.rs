//! Filter for the requested runtime bucket.

use crate::preferences::UserPreferences;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;
use tracing::debug;

/// Keeps movies whose runtime falls in the requested bucket.
///
/// Buckets are half-open: `60 -> [0, 90)`, `90 -> [90, 120)`,
/// `120 -> [120, 150)`, `150 -> [150, 180)`, `180 -> [180, ...)`.
/// An unknown bucket code leaves the input unchanged.
pub struct DurationFilter;

impl Filter for DurationFilter {
    fn name(&self) -> &str {
        "DurationFilter"
    }

    fn apply<'a>(
        &self,
        movies: Vec<&'a Movie>,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>> {
        let bucket = match preferences.duration() {
            None => return Ok(movies),
            Some(Err(e)) => {
                debug!("{}", e);
                return Ok(movies);
            }
            Some(Ok(bucket)) => bucket,
        };

        let filtered: Vec<&Movie> = movies
            .into_iter()
            .filter(|movie| bucket.contains(movie.runtime))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{movie, titles};

    fn create_test_movies() -> Vec<Movie> {
        vec![
            movie("Short", "Drama", 7.0, 89, 2000),
            movie("Ninety", "Drama", 7.0, 90, 2000),
            movie("Long", "Drama", 7.0, 119, 2000),
            movie("Epic", "Drama", 7.0, 240, 2000),
        ]
    }

    #[test]
    fn test_bucket_boundaries_are_half_open() {
        let movies = create_test_movies();

        let prefs = UserPreferences::new().with_duration("90");
        let filtered = DurationFilter.apply(movies.iter().collect(), &prefs).unwrap();
        assert_eq!(titles(&filtered), vec!["Ninety", "Long"]);

        let prefs = UserPreferences::new().with_duration("60");
        let filtered = DurationFilter.apply(movies.iter().collect(), &prefs).unwrap();
        assert_eq!(titles(&filtered), vec!["Short"]);
    }

    #[test]
    fn test_open_ended_bucket() {
        let movies = create_test_movies();
        let prefs = UserPreferences::new().with_duration("180");

        let filtered = DurationFilter.apply(movies.iter().collect(), &prefs).unwrap();
        assert_eq!(titles(&filtered), vec!["Epic"]);
    }

    #[test]
    fn test_unknown_bucket_is_skipped() {
        let movies = create_test_movies();
        let prefs = UserPreferences::new().with_duration("45");

        let filtered = DurationFilter.apply(movies.iter().collect(), &prefs).unwrap();
        assert_eq!(filtered.len(), 4);
    }
}
