//! Filter to keep only movies of the requested genre.

use crate::preferences::UserPreferences;
use crate::traits::Filter;
use anyhow::Result;
use data_loader::Movie;

/// Keeps movies whose main genre matches the requested genre exactly.
///
/// Matching is case-sensitive. No genre requested means no filtering.
pub struct GenreFilter;

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'a>(
        &self,
        movies: Vec<&'a Movie>,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>> {
        let Some(genre) = preferences.genre() else {
            return Ok(movies);
        };

        let filtered: Vec<&Movie> = movies
            .into_iter()
            .filter(|movie| movie.main_genre == genre)
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::{movie, titles};

    #[test]
    fn test_genre_filter() {
        let movies = vec![
            movie("Heat", "Action", 7.7, 170, 1995),
            movie("Se7en", "Crime", 8.1, 127, 1995),
            movie("Speed", "Action", 6.8, 116, 1994),
            movie("Lowercase", "action", 5.0, 90, 2000),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let prefs = UserPreferences::new().with_genre("Action");
        let filtered = GenreFilter.apply(refs, &prefs).unwrap();

        assert_eq!(titles(&filtered), vec!["Heat", "Speed"]);
    }

    #[test]
    fn test_genre_filter_no_genre() {
        let movies = vec![
            movie("Heat", "Action", 7.7, 170, 1995),
            movie("Se7en", "Crime", 8.1, 127, 1995),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let filtered = GenreFilter.apply(refs, &UserPreferences::new().with_genre("")).unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
