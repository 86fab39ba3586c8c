//! Quick match: the simplified distance ranking used by the desktop front end.
//!
//! This is a separate mode, not a variant of [`SimilarityScorer`]. It takes
//! plain numbers instead of bucket codes and ranges, never filters, and
//! ranks by a penalty where lower is better:
//!
//! ```text
//! distance = |runtime - duration| * 0.5
//!          + |vote_average - rating| * 1.5
//!          + (0 if genre matches else 2)
//! ```
//!
//! The two modes disagree on both formula and weights and can order the
//! same movies differently.
//!
//! [`SimilarityScorer`]: crate::SimilarityScorer

use data_loader::Movie;

const RUNTIME_WEIGHT: f64 = 0.5;
const RATING_WEIGHT: f64 = 1.5;
const GENRE_MISMATCH_PENALTY: f64 = 2.0;

/// Number of matches returned by default
pub const DEFAULT_QUICK_MATCH_LIMIT: usize = 5;

/// Inputs of a quick match
#[derive(Debug, Clone, PartialEq)]
pub struct QuickMatchQuery {
    pub genre: String,
    /// Desired runtime in minutes
    pub duration: f64,
    pub rating: f64,
}

/// Ranks the whole catalog by distance to a [`QuickMatchQuery`].
#[derive(Debug, Clone, Copy)]
pub struct QuickMatchScorer {
    limit: usize,
}

impl QuickMatchScorer {
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_QUICK_MATCH_LIMIT,
        }
    }

    /// Configure how many matches to return (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn distance(&self, movie: &Movie, query: &QuickMatchQuery) -> f64 {
        let genre_penalty = if movie.main_genre == query.genre {
            0.0
        } else {
            GENRE_MISMATCH_PENALTY
        };

        (movie.runtime as f64 - query.duration).abs() * RUNTIME_WEIGHT
            + (movie.vote_average - query.rating).abs() * RATING_WEIGHT
            + genre_penalty
    }

    /// Closest movies first. Equal distances keep catalog order.
    pub fn top_matches<'a>(&self, movies: &'a [Movie], query: &QuickMatchQuery) -> Vec<(&'a Movie, f64)> {
        let mut scored: Vec<(&Movie, f64)> = movies
            .iter()
            .map(|movie| (movie, self.distance(movie, query)))
            .collect();

        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.limit);
        scored
    }
}

impl Default for QuickMatchScorer {
    fn default() -> Self {
        Self::new()
    }
}
