//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a slice of the catalog.

use crate::preferences::UserPreferences;
use anyhow::Result;
use data_loader::Movie;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows one pipeline to be shared by concurrent request handlers
/// - Filters work on borrowed movies; the catalog itself is never copied or mutated
/// - A filter whose preference is absent or malformed returns its input unchanged
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of movies.
    ///
    /// # Arguments
    /// * `movies` - The movies to filter (takes ownership of the list, not the movies)
    /// * `preferences` - What the user asked for
    ///
    /// # Returns
    /// * `Ok(Vec<&Movie>)` - The movies that passed, in their original order
    /// * `Err` - If filtering fails
    fn apply<'a>(
        &self,
        movies: Vec<&'a Movie>,
        preferences: &UserPreferences,
    ) -> Result<Vec<&'a Movie>>;
}
