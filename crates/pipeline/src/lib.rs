//! Preference matching for the movie catalog.
//!
//! This crate provides:
//! - UserPreferences and the parsers for each preference dimension
//! - Filter trait and implementations for hard constraints
//! - FilterPipeline for composing filters
//! - SimilarityScorer for the weighted similarity used in ranking
//! - Ranker for ordering and paginating results
//! - CaseReviser for replacing recommendations that got poor feedback
//! - QuickMatchScorer, the simplified desktop ranking
//!
//! ## Architecture
//! A request is processed in stages:
//! 1. Filters narrow the catalog (genre, year range, rating, duration)
//! 2. SimilarityScorer scores the surviving movies
//! 3. Ranker sorts by rating then similarity and slices one page
//!
//! Independently, feedback on a recommendation goes through CaseReviser.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, Ranker, UserPreferences};
//!
//! let preferences = UserPreferences::new()
//!     .with_genre("Drama")
//!     .with_year_range("2000-2010");
//!
//! let filtered = FilterPipeline::standard().filter_catalog(&catalog, &preferences)?;
//! let page = Ranker::default().rank_and_page(filtered, &preferences, 1);
//! ```

pub mod traits;
pub mod preferences;
pub mod filters;
pub mod filter_pipeline;
pub mod similarity;
pub mod ranking;
pub mod revise;
pub mod quick_match;

// Re-export main types
pub use traits::Filter;
pub use preferences::{DurationBucket, PreferenceParseError, RatingRange, UserPreferences, YearRange};
pub use filter_pipeline::FilterPipeline;
pub use similarity::{ScoreBreakdown, SimilarityScorer, SimilarityWeights};
pub use ranking::{RankedPage, Ranker, Recommendation, PAGE_SIZE};
pub use revise::{CaseReviser, Feedback, Revision};
pub use quick_match::{QuickMatchQuery, QuickMatchScorer};
