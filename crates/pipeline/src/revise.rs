//! Case revision: replace a poorly received recommendation.
//!
//! When feedback on a recommendation is low, the reviser looks for the
//! best-rated movie of the same genre that beats it and offers that instead.
//! This is a single substitution; it never re-runs scoring or filtering.

use data_loader::{Movie, MovieCatalog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Feedback ratings below this trigger a revision
pub const DEFAULT_REVISION_THRESHOLD: i32 = 4;

/// A user's reaction to one recommended movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub movie_title: String,
    /// Small-scale rating, typically 1-5
    pub rating: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Feedback {
    pub fn new(movie_title: impl Into<String>, rating: i32) -> Self {
        Self {
            movie_title: movie_title.into(),
            rating,
            comment: None,
        }
    }
}

/// Outcome of a revision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Revision<'a> {
    /// The original recommendation stands
    Unchanged(&'a Movie),
    /// A better-rated movie of the same genre replaces it
    Substituted(&'a Movie),
}

impl<'a> Revision<'a> {
    /// The recommendation to present
    pub fn movie(&self) -> &'a Movie {
        match *self {
            Revision::Unchanged(movie) | Revision::Substituted(movie) => movie,
        }
    }

    pub fn is_substituted(&self) -> bool {
        matches!(self, Revision::Substituted(_))
    }
}

/// Revises recommendations against the full catalog.
#[derive(Debug, Clone)]
pub struct CaseReviser {
    catalog: Arc<MovieCatalog>,
    threshold: i32,
}

impl CaseReviser {
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self {
            catalog,
            threshold: DEFAULT_REVISION_THRESHOLD,
        }
    }

    /// Configure the feedback rating below which revision happens (default: 4)
    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn needs_revision(&self, feedback: &Feedback) -> bool {
        feedback.rating < self.threshold
    }

    /// Apply the feedback to a recommendation.
    ///
    /// ## Algorithm
    /// 1. Feedback at or above the threshold keeps the recommendation
    /// 2. A recommendation without a genre is kept
    /// 3. Otherwise pick the highest-rated same-genre movie rated strictly
    ///    higher than the recommendation (first in catalog order on ties)
    /// 4. No such movie keeps the recommendation
    pub fn revise<'a>(&'a self, recommendation: &'a Movie, feedback: &Feedback) -> Revision<'a> {
        if !self.needs_revision(feedback) || recommendation.main_genre.is_empty() {
            info!("Revising recommendation: No revision needed or no suitable alternative found.");
            return Revision::Unchanged(recommendation);
        }

        let genre = &recommendation.main_genre;
        let mut best: Option<&Movie> = None;
        let mut alternatives = 0usize;
        for candidate in self.catalog.movies_by_genre(genre) {
            if candidate.vote_average <= recommendation.vote_average {
                continue;
            }
            alternatives += 1;
            if best.is_none_or(|b| candidate.vote_average > b.vote_average) {
                best = Some(candidate);
            }
        }

        match best {
            Some(alternative) => {
                info!(
                    "Revising recommendation: Found {} alternatives in genre {}.",
                    alternatives, genre
                );
                Revision::Substituted(alternative)
            }
            None => {
                info!(
                    "Revising recommendation: No higher-rated alternatives found in genre {}.",
                    genre
                );
                Revision::Unchanged(recommendation)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::movie;

    fn create_test_catalog() -> Arc<MovieCatalog> {
        Arc::new(MovieCatalog::from_movies(vec![
            movie("A", "Drama", 7.0, 100, 2015),
            movie("B", "Drama", 8.5, 110, 2018),
            movie("C", "Drama", 8.5, 120, 2019),
            movie("D", "Drama", 7.5, 95, 2010),
            movie("E", "Comedy", 9.9, 90, 2012),
        ]))
    }

    #[test]
    fn test_low_feedback_substitutes_best_same_genre() {
        let catalog = create_test_catalog();
        let reviser = CaseReviser::new(catalog.clone());
        let original = catalog.get_by_title("A").unwrap();

        let revision = reviser.revise(original, &Feedback::new("A", 2));

        assert!(revision.is_substituted());
        // B and C tie at 8.5; the first loaded wins
        assert_eq!(revision.movie().title, "B");
    }

    #[test]
    fn test_high_feedback_is_noop() {
        let catalog = create_test_catalog();
        let reviser = CaseReviser::new(catalog.clone());
        let original = catalog.get_by_title("A").unwrap();

        for rating in [4, 5] {
            let revision = reviser.revise(original, &Feedback::new("A", rating));
            assert_eq!(revision, Revision::Unchanged(original));
        }
    }

    #[test]
    fn test_top_rated_is_kept() {
        let catalog = create_test_catalog();
        let reviser = CaseReviser::new(catalog.clone());
        let best = catalog.get_by_title("B").unwrap();

        let revision = reviser.revise(best, &Feedback::new("B", 1));
        assert_eq!(revision.movie().title, "B");
        assert!(!revision.is_substituted());
    }

    #[test]
    fn test_missing_genre_is_kept() {
        let reviser = CaseReviser::new(create_test_catalog());
        let genreless = movie("Genreless", "", 1.0, 100, 2000);

        let revision = reviser.revise(&genreless, &Feedback::new("Genreless", 1));
        assert_eq!(revision.movie(), &genreless);
    }

    #[test]
    fn test_custom_threshold() {
        let catalog = create_test_catalog();
        let reviser = CaseReviser::new(catalog.clone()).with_threshold(2);
        let original = catalog.get_by_title("D").unwrap();

        assert!(!reviser.revise(original, &Feedback::new("D", 3)).is_substituted());
        assert!(reviser.revise(original, &Feedback::new("D", 1)).is_substituted());
    }
}
