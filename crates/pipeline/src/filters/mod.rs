//! Filter implementations for the recommendation pipeline.
//!
//! One filter per preference dimension. They are independent of each other,
//! so their order changes only how much work later filters do.

pub mod duration;
pub mod genre;
pub mod rating;
pub mod year_range;

// Re-export for convenience
pub use duration::DurationFilter;
pub use genre::GenreFilter;
pub use rating::RatingFilter;
pub use year_range::YearRangeFilter;
