//! MovieCatalog loading logic.
//!
//! Reads the cleaned movie CSV, coerces every row into a [`Movie`] and
//! builds the catalog indices.
//!
//! Steps:
//! 1. Deserialize rows (every column optional)
//! 2. Coerce rows into movies in parallel (order preserved)
//! 3. Derive `year` from `release_date` when the file carries no usable years
//! 4. Index by title and genre

use crate::error::{DataLoadError, Result};
use crate::parser::{self, RawMovieRow};
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

impl MovieCatalog {
    /// Load the cleaned dataset from a CSV file
    ///
    /// This is the main entry point for loading data. Callers that must keep
    /// running without data can fall back to [`MovieCatalog::new`] on error.
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);

        if !path.exists() {
            return Err(DataLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut reader = csv::Reader::from_path(path)?;
        let mut rows: Vec<RawMovieRow> = Vec::new();
        for result in reader.deserialize() {
            let row: RawMovieRow = result.map_err(|e| DataLoadError::ParseError {
                file: file_name.clone(),
                line: e.position().map(|p| p.line() as usize).unwrap_or(0),
                reason: e.to_string(),
            })?;
            rows.push(row);
        }

        let release_dates: Vec<Option<String>> =
            rows.iter().map(|r| r.release_date.clone()).collect();

        let mut movies: Vec<Movie> = rows
            .into_par_iter()
            .map(RawMovieRow::into_movie)
            .collect();

        if derive_years_from_release_dates(&mut movies, &release_dates) {
            info!("Extracted 'year' from 'release_date' column");
        }

        let catalog = MovieCatalog::from_movies(movies);
        let (min_year, max_year) = catalog.year_bounds();
        info!(
            "Loaded {} movies across {} genres (years {} to {})",
            catalog.len(),
            catalog.genre_index.len(),
            min_year,
            max_year
        );
        Ok(catalog)
    }
}

/// Fill in years from release dates, but only when no row has a year of its own.
///
/// Returns whether any year was derived.
fn derive_years_from_release_dates(movies: &mut [Movie], release_dates: &[Option<String>]) -> bool {
    if movies.is_empty() || movies.iter().any(|m| m.year != 0) {
        return false;
    }
    if release_dates.iter().all(Option::is_none) {
        debug!("No 'year' or 'release_date' values; all years stay unknown");
        return false;
    }

    for (movie, date) in movies.iter_mut().zip(release_dates) {
        movie.year = date
            .as_deref()
            .and_then(parser::year_from_release_date)
            .unwrap_or(0);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_load_cleaned_dataset() {
        let file = write_csv(&[
            "title,main_genre,runtime,vote_average,imdb_id,release_date,year",
            "Toy Story,Animation,81.0,7.7,tt0114709,1995-10-30,1995",
            "Heat,Action,170.0,7.7,tt0113277,1995-12-15,1995",
            "Se7en,Crime,127.0,8.1,tt0114369,1995-09-22,1995",
        ]);

        let catalog = MovieCatalog::load_from_csv(file.path()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.movies()[0].title, "Toy Story");
        assert_eq!(catalog.get_by_title("Heat").unwrap().runtime, 170);
        assert_eq!(catalog.genres(), vec!["Action", "Animation", "Crime"]);
        assert_eq!(catalog.year_bounds(), (1995, 1995));
    }

    #[test]
    fn test_missing_columns_get_defaults() {
        let file = write_csv(&[
            "title,genres,vote_average",
            "Jumanji,\"[{'id': 12, 'name': 'Adventure'}]\",6.9",
            "Nameless,[],not-a-number",
        ]);

        let catalog = MovieCatalog::load_from_csv(file.path()).unwrap();
        let jumanji = catalog.get_by_title("Jumanji").unwrap();
        assert_eq!(jumanji.main_genre, "Adventure");
        assert_eq!(jumanji.runtime, 0);
        assert_eq!(jumanji.id, 0);

        let nameless = catalog.get_by_title("Nameless").unwrap();
        assert_eq!(nameless.main_genre, UNKNOWN_GENRE);
        assert_eq!(nameless.vote_average, 0.0);
    }

    #[test]
    fn test_year_derived_from_release_date() {
        let file = write_csv(&[
            "title,main_genre,release_date",
            "Heat,Action,1995-12-15",
            "Undated,Drama,",
        ]);

        let catalog = MovieCatalog::load_from_csv(file.path()).unwrap();
        assert_eq!(catalog.get_by_title("Heat").unwrap().year, 1995);
        assert_eq!(catalog.get_by_title("Undated").unwrap().year, 0);
    }

    #[test]
    fn test_existing_years_are_not_overwritten() {
        let file = write_csv(&[
            "title,main_genre,release_date,year",
            "Heat,Action,1995-12-15,2001",
            "Other,Drama,1980-01-01,0",
        ]);

        let catalog = MovieCatalog::load_from_csv(file.path()).unwrap();
        assert_eq!(catalog.get_by_title("Heat").unwrap().year, 2001);
        assert_eq!(catalog.get_by_title("Other").unwrap().year, 0);
    }

    #[test]
    fn test_missing_file() {
        let result = MovieCatalog::load_from_csv(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
