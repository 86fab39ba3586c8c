//! Core domain types for the movie catalog.
//!
//! A [`Movie`] is one row of the cleaned dataset. The [`MovieCatalog`] owns
//! every movie for the lifetime of the process and hands out borrowed views,
//! so request handlers can share one catalog behind an `Arc` without locking.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases & Constants
// =============================================================================

/// Numeric identifier carried over from the source dataset (0 when absent)
pub type MovieId = u64;

/// Genre assigned to movies whose genre list was empty or unreadable
pub const UNKNOWN_GENRE: &str = "N/A";

/// Year bounds reported when the catalog holds no movies
pub const DEFAULT_YEAR_BOUNDS: (i32, i32) = (2010, 2024);

// =============================================================================
// Movie
// =============================================================================

/// A single movie from the cleaned dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// First entry of the movie's original genre list, or [`UNKNOWN_GENRE`]
    pub main_genre: String,
    /// Average audience rating on a 0-10 scale
    pub vote_average: f64,
    /// Runtime in minutes, 0 when unknown
    pub runtime: u32,
    /// Release year, 0 when unknown
    pub year: i32,
    #[serde(default)]
    pub overview: String,
}

// =============================================================================
// MovieCatalog - the read-only in-memory dataset
// =============================================================================

/// Holds every movie in load order plus lookup indices.
///
/// Movies are stored in a `Vec` so that iteration order matches the source
/// file; the indices store positions into that `Vec`.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    pub(crate) movies: Vec<Movie>,
    /// Title -> position of the first movie with that exact title
    pub(crate) title_index: HashMap<String, usize>,
    /// Genre -> positions of its movies, in load order. BTreeMap keeps genres sorted.
    pub(crate) genre_index: BTreeMap<String, Vec<usize>>,
}

impl MovieCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from movies already in memory, preserving their order
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        let mut catalog = Self::new();
        for movie in movies {
            catalog.insert_movie(movie);
        }
        catalog
    }

    /// Append a movie and index it
    pub fn insert_movie(&mut self, movie: Movie) {
        let position = self.movies.len();
        self.title_index
            .entry(movie.title.clone())
            .or_insert(position);
        self.genre_index
            .entry(movie.main_genre.clone())
            .or_default()
            .push(position);
        self.movies.push(movie);
    }

    /// All movies in load order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Look a movie up by exact title. Duplicate titles resolve to the first one loaded.
    pub fn get_by_title(&self, title: &str) -> Option<&Movie> {
        self.title_index.get(title).map(|&i| &self.movies[i])
    }

    /// All movies with exactly this main genre, in load order
    pub fn movies_by_genre(&self, genre: &str) -> Vec<&Movie> {
        self.genre_index
            .get(genre)
            .map(|positions| positions.iter().map(|&i| &self.movies[i]).collect())
            .unwrap_or_default()
    }

    /// Sorted list of distinct main genres
    pub fn genres(&self) -> Vec<&str> {
        self.genre_index.keys().map(String::as_str).collect()
    }

    /// Smallest and largest release year in the catalog
    ///
    /// Unknown years (0) take part like any other value.
    pub fn year_bounds(&self) -> (i32, i32) {
        let min = self.movies.iter().map(|m| m.year).min();
        let max = self.movies.iter().map(|m| m.year).max();
        match (min, max) {
            (Some(min), Some(max)) => (min, max),
            _ => DEFAULT_YEAR_BOUNDS,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
