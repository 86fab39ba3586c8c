//! Similarity scoring for filtered movies.
//!
//! The similarity score only orders movies that already passed the filters;
//! it never decides inclusion. It is a weighted sum of four terms:
//!
//! | term     | weight | value                                   |
//! |----------|--------|-----------------------------------------|
//! | genre    | 0.4    | full weight on exact genre match        |
//! | rating   | 0.3    | `1 - |vote_average - target| / 10`      |
//! | duration | 0.2    | `1 - |runtime - bucket target| / 200`    |
//! | year     | 0.1    | `1 - year distance / 50`                |
//!
//! A term whose preference is absent or malformed contributes 0. Terms are
//! not clamped, so large mismatches can push a term (and the total) below 0.

use crate::preferences::UserPreferences;
use data_loader::Movie;
use rayon::prelude::*;

const RATING_SCALE: f64 = 10.0;
const RUNTIME_SCALE: f64 = 200.0;
const YEAR_SCALE: f64 = 50.0;

/// Weight of each similarity term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub genre: f64,
    pub rating: f64,
    pub duration: f64,
    pub year: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            genre: 0.4,
            rating: 0.3,
            duration: 0.2,
            year: 0.1,
        }
    }
}

/// Per-term contributions for one movie.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub genre: f64,
    pub rating: f64,
    pub duration: f64,
    pub year: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.genre + self.rating + self.duration + self.year
    }
}

/// Scores movies against user preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    weights: SimilarityWeights,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the term weights (default: 0.4 / 0.3 / 0.2 / 0.1)
    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> SimilarityWeights {
        self.weights
    }

    /// Similarity of one movie to the preferences
    pub fn score(&self, movie: &Movie, preferences: &UserPreferences) -> f64 {
        self.breakdown(movie, preferences).total()
    }

    /// Score many movies in parallel. Output order matches input order.
    pub fn score_all(&self, movies: &[&Movie], preferences: &UserPreferences) -> Vec<f64> {
        movies
            .par_iter()
            .map(|movie| self.score(movie, preferences))
            .collect()
    }

    /// Compute each term separately
    pub fn breakdown(&self, movie: &Movie, preferences: &UserPreferences) -> ScoreBreakdown {
        ScoreBreakdown {
            genre: self.genre_term(movie, preferences),
            rating: self.rating_term(movie, preferences),
            duration: self.duration_term(movie, preferences),
            year: self.year_term(movie, preferences),
        }
    }

    fn genre_term(&self, movie: &Movie, preferences: &UserPreferences) -> f64 {
        match preferences.genre() {
            Some(genre) if movie.main_genre == genre => self.weights.genre,
            _ => 0.0,
        }
    }

    fn rating_term(&self, movie: &Movie, preferences: &UserPreferences) -> f64 {
        let Some(target) = preferences.target_rating() else {
            return 0.0;
        };
        let diff = (movie.vote_average - target).abs();
        self.weights.rating * (1.0 - diff / RATING_SCALE)
    }

    fn duration_term(&self, movie: &Movie, preferences: &UserPreferences) -> f64 {
        let Some(Ok(bucket)) = preferences.duration() else {
            return 0.0;
        };
        let diff = (movie.runtime as f64 - bucket.target_runtime()).abs();
        self.weights.duration * (1.0 - diff / RUNTIME_SCALE)
    }

    fn year_term(&self, movie: &Movie, preferences: &UserPreferences) -> f64 {
        let Some(Ok(range)) = preferences.year_range() else {
            return 0.0;
        };
        let diff = range.distance(movie.year);
        self.weights.year * (1.0 - diff / YEAR_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::movie;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_no_preferences_scores_zero() {
        let m = movie("Heat", "Action", 7.7, 170, 1995);
        assert_eq!(SimilarityScorer::new().score(&m, &UserPreferences::new()), 0.0);
    }

    #[test]
    fn test_genre_term() {
        let scorer = SimilarityScorer::new();
        let m = movie("Heat", "Action", 7.7, 170, 1995);

        let matching = UserPreferences::new().with_genre("Action");
        assert_close(scorer.breakdown(&m, &matching).genre, 0.4);

        let other_case = UserPreferences::new().with_genre("action");
        assert_eq!(scorer.breakdown(&m, &other_case).genre, 0.0);
    }

    #[test]
    fn test_rating_term_is_symmetric() {
        let scorer = SimilarityScorer::new();
        let prefs = UserPreferences::new().with_rating("7");

        let above = scorer.score(&movie("Above", "Drama", 8.5, 100, 2000), &prefs);
        let below = scorer.score(&movie("Below", "Drama", 5.5, 100, 2000), &prefs);
        assert_close(above, below);
        assert_close(above, 0.3 * (1.0 - 1.5 / 10.0));
    }

    #[test]
    fn test_rating_range_does_not_score() {
        let scorer = SimilarityScorer::new();
        let prefs = UserPreferences::new().with_rating("6-8");
        let m = movie("Heat", "Action", 7.7, 170, 1995);

        assert_eq!(scorer.breakdown(&m, &prefs).rating, 0.0);
    }

    #[test]
    fn test_rating_target_zero_still_compares() {
        let scorer = SimilarityScorer::new();
        let prefs = UserPreferences::new().with_rating("0");
        let m = movie("Heat", "Action", 8.0, 170, 1995);

        assert_close(scorer.breakdown(&m, &prefs).rating, 0.3 * 0.2);
    }

    #[test]
    fn test_duration_term() {
        let scorer = SimilarityScorer::new();
        let prefs = UserPreferences::new().with_duration("90");

        let exact = movie("Exact", "Drama", 7.0, 105, 2000);
        assert_close(scorer.breakdown(&exact, &prefs).duration, 0.2);

        let off = movie("Off", "Drama", 7.0, 125, 2000);
        assert_close(scorer.breakdown(&off, &prefs).duration, 0.2 * (1.0 - 20.0 / 200.0));

        let unknown = UserPreferences::new().with_duration("100");
        assert_eq!(scorer.breakdown(&exact, &unknown).duration, 0.0);
    }

    #[test]
    fn test_year_term() {
        let scorer = SimilarityScorer::new();
        let m = movie("Heat", "Action", 7.7, 170, 1995);

        let open = UserPreferences::new().with_year_range(">=2000");
        assert_close(scorer.breakdown(&m, &open).year, 0.1 * (1.0 - 5.0 / 50.0));

        let satisfied = UserPreferences::new().with_year_range(">=1990");
        assert_close(scorer.breakdown(&m, &satisfied).year, 0.1);

        let closed = UserPreferences::new().with_year_range("1990-2000");
        assert_close(scorer.breakdown(&m, &closed).year, 0.1);

        let malformed = UserPreferences::new().with_year_range("1990s");
        assert_eq!(scorer.breakdown(&m, &malformed).year, 0.0);
    }

    #[test]
    fn test_terms_are_not_clamped() {
        let scorer = SimilarityScorer::new();
        let m = movie("Ancient", "Drama", 7.0, 100, 0);
        let prefs = UserPreferences::new().with_year_range(">=2020");

        // An unknown year is 2020 years short of the threshold
        assert!(scorer.score(&m, &prefs) < 0.0);
    }

    #[test]
    fn test_extreme_preferences_score_finitely() {
        let scorer = SimilarityScorer::new();
        let m = movie("Heat", "Action", 7.7, 170, 2000);

        let lowest = UserPreferences::new().with_year_range(">=-2147483648");
        assert_close(scorer.score(&m, &lowest), 0.1);

        let widest = UserPreferences::new().with_year_range("-2147483648-2147483647");
        assert!(scorer.score(&m, &widest).is_finite());

        for rating in ["inf", "NaN", "1e308", "-0"] {
            let prefs = UserPreferences::new().with_rating(rating);
            assert!(scorer.score(&m, &prefs).is_finite(), "rating {rating}");
        }

        let highest = UserPreferences::new().with_year_range(">=2147483647");
        assert!(scorer.score(&m, &highest).is_finite());
    }

    #[test]
    fn test_score_all_preserves_order() {
        let scorer = SimilarityScorer::new();
        let prefs = UserPreferences::new().with_genre("Drama");
        let movies = vec![
            movie("A", "Drama", 7.0, 100, 2015),
            movie("B", "Comedy", 8.5, 110, 2018),
        ];
        let refs: Vec<&Movie> = movies.iter().collect();

        let scores = scorer.score_all(&refs, &prefs);
        assert_close(scores[0], 0.4);
        assert_eq!(scores[1], 0.0);
    }
}
