//! # Data Loader Crate
//!
//! This crate loads the cleaned movie dataset into memory and prepares it
//! from the raw metadata dump.
//!
//! ## Main Components
//!
//! - **types**: `Movie` and the read-only `MovieCatalog`
//! - **parser**: Row coercion and genre-list parsing
//! - **index**: Loading the catalog from CSV
//! - **preprocess**: Cleaning `movies_metadata.csv` into the dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_csv(Path::new("data/processed_movies.csv"))?;
//!
//! let movie = catalog.get_by_title("Heat").unwrap();
//! let dramas = catalog.movies_by_genre("Drama");
//! println!("{} is one of {} movies", movie.title, catalog.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod preprocess;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use preprocess::{preprocess, PreprocessSummary};
pub use types::{Movie, MovieCatalog, MovieId, DEFAULT_YEAR_BOUNDS, UNKNOWN_GENRE};
