//! Ranking and pagination of filtered movies.
//!
//! Movies are ordered by vote average (highest first), then by similarity
//! score (highest first). The sort is stable, so anything still tied keeps
//! its catalog order and identical inputs always produce identical pages.

use crate::preferences::UserPreferences;
use crate::similarity::SimilarityScorer;
use data_loader::Movie;
use serde::Serialize;
use std::cmp::Ordering;
use std::ops::Range;

/// Number of recommendations per page
pub const PAGE_SIZE: usize = 6;

/// A movie annotated with its similarity to the request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub movie: Movie,
    pub similarity_score: f64,
}

/// One page of ranked recommendations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage {
    pub recommendations: Vec<Recommendation>,
    /// 1-based page number that was requested
    pub page: usize,
    /// How many movies matched the filters, across all pages
    pub total_matches: usize,
}

impl RankedPage {
    /// True when this page holds nothing (no matches, or past the last page)
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Scores, sorts and slices filtered movies.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    scorer: SimilarityScorer,
    page_size: usize,
}

impl Ranker {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self {
            scorer,
            page_size: PAGE_SIZE,
        }
    }

    /// Configure the page size (default: 6)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Score every movie and sort the full list
    pub fn rank<'a>(&self, movies: Vec<&'a Movie>, preferences: &UserPreferences) -> Vec<(&'a Movie, f64)> {
        let scores = self.scorer.score_all(&movies, preferences);
        let mut ranked: Vec<(&Movie, f64)> = movies.into_iter().zip(scores).collect();

        ranked.sort_by(|a, b| {
            b.0.vote_average
                .partial_cmp(&a.0.vote_average)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
        });
        ranked
    }

    /// Rank the filtered movies and return the requested 1-based page.
    ///
    /// Pages past the end (and page 0) are empty rather than an error.
    pub fn rank_and_page(
        &self,
        filtered: Vec<&Movie>,
        preferences: &UserPreferences,
        page: usize,
    ) -> RankedPage {
        let total_matches = filtered.len();
        let ranked = self.rank(filtered, preferences);

        let recommendations = page_bounds(page, self.page_size, ranked.len())
            .map(|range| {
                ranked[range]
                    .iter()
                    .map(|(movie, score)| Recommendation {
                        movie: (*movie).clone(),
                        similarity_score: *score,
                    })
                    .collect()
            })
            .unwrap_or_default();

        RankedPage {
            recommendations,
            page,
            total_matches,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(SimilarityScorer::new())
    }
}

/// Index range of a 1-based page, clipped to `len`. `None` when the page is empty.
pub fn page_bounds(page: usize, page_size: usize, len: usize) -> Option<Range<usize>> {
    let start = page.checked_sub(1)?.checked_mul(page_size)?;
    if start >= len {
        return None;
    }
    let end = start.saturating_add(page_size).min(len);
    Some(start..end)
}

/// Number of non-empty pages for `len` results
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}
