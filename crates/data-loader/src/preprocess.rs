//! Offline cleaning of the raw movie metadata dump.
//!
//! Turns `movies_metadata.csv` (one row per movie, genres stored as a
//! serialized list of dicts) into the cleaned file the catalog loader reads.
//! A row survives only if it has:
//! - non-empty genres, runtime, vote_average, imdb_id and release_date
//! - a readable first genre
//! - an IMDb id of the form `tt...`
//! - a `YYYY-MM-DD` release date

use crate::error::{DataLoadError, Result};
use crate::parser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Columns that must exist in the raw file
const REQUIRED_COLUMNS: [&str; 6] = [
    "title",
    "genres",
    "runtime",
    "vote_average",
    "imdb_id",
    "release_date",
];

#[derive(Debug, Deserialize)]
struct RawMetadataRow {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    runtime: Option<String>,
    #[serde(default)]
    vote_average: Option<String>,
    #[serde(default)]
    imdb_id: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

/// One row of the cleaned dataset, in output column order
#[derive(Debug, Serialize)]
struct CleanMovieRow {
    title: String,
    main_genre: String,
    runtime: String,
    vote_average: String,
    imdb_id: String,
    release_date: String,
    year: i32,
}

/// Row counts reported after a preprocessing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessSummary {
    pub rows_read: usize,
    pub rows_written: usize,
}

impl PreprocessSummary {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_written
    }
}

/// Clean `input` and write the result to `output`
pub fn preprocess(input: &Path, output: &Path) -> Result<PreprocessSummary> {
    info!("Preprocessing raw metadata from {:?}", input);

    if !input.exists() {
        return Err(DataLoadError::FileNotFound {
            path: input.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(input)?;
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                file: input.display().to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut writer = csv::Writer::from_path(output)?;
    let mut summary = PreprocessSummary {
        rows_read: 0,
        rows_written: 0,
    };

    for result in reader.deserialize::<RawMetadataRow>() {
        summary.rows_read += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                debug!("Skipping unreadable row {}: {}", summary.rows_read, e);
                continue;
            }
        };

        if let Some(clean) = clean_row(row) {
            writer.serialize(clean)?;
            summary.rows_written += 1;
        }
    }
    writer.flush()?;

    info!(
        "Preprocessing finished: {} rows read, {} written to {:?}",
        summary.rows_read, summary.rows_written, output
    );
    Ok(summary)
}

fn clean_row(row: RawMetadataRow) -> Option<CleanMovieRow> {
    let genres = present(row.genres)?;
    let runtime = present(row.runtime)?;
    let vote_average = present(row.vote_average)?;
    let imdb_id = present(row.imdb_id)?;
    let release_date = present(row.release_date)?;

    let main_genre = parser::first_genre_name(&genres)?;
    if !imdb_id.starts_with("tt") {
        return None;
    }
    let year = parser::year_from_release_date(&release_date)?;

    Some(CleanMovieRow {
        title: row.title.unwrap_or_default(),
        main_genre,
        runtime,
        vote_average,
        imdb_id,
        release_date,
        year,
    })
}

fn present(cell: Option<String>) -> Option<String> {
    cell.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MovieCatalog;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    #[test]
    fn test_preprocess_filters_and_derives() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "adult,genres,imdb_id,release_date,runtime,title,vote_average").unwrap();
        writeln!(input, "False,\"[{{'id': 16, 'name': 'Animation'}}]\",tt0114709,1995-10-30,81.0,Toy Story,7.7").unwrap();
        // no genres
        writeln!(input, "False,[],tt0113497,1995-12-15,104.0,Jumanji,6.9").unwrap();
        // bad imdb id
        writeln!(input, "False,\"[{{'id': 18, 'name': 'Drama'}}]\",0,1995-12-22,101.0,Broken Id,6.1").unwrap();
        // unparseable release date
        writeln!(input, "False,\"[{{'id': 18, 'name': 'Drama'}}]\",tt0114885,someday,127.0,No Date,5.7").unwrap();
        // missing runtime
        writeln!(input, "False,\"[{{'id': 35, 'name': 'Comedy'}}]\",tt0113041,1995-02-10,,No Runtime,5.7").unwrap();

        let dir = tempdir().unwrap();
        let output = dir.path().join("processed_movies.csv");
        let summary = preprocess(input.path(), &output).unwrap();

        assert_eq!(summary.rows_read, 5);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.rows_dropped(), 4);

        let catalog = MovieCatalog::load_from_csv(&output).unwrap();
        let toy_story = catalog.get_by_title("Toy Story").unwrap();
        assert_eq!(toy_story.main_genre, "Animation");
        assert_eq!(toy_story.year, 1995);
        assert_eq!(toy_story.runtime, 81);
    }

    #[test]
    fn test_preprocess_requires_columns() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "title,genres").unwrap();
        writeln!(input, "Toy Story,[]").unwrap();

        let dir = tempdir().unwrap();
        let result = preprocess(input.path(), &dir.path().join("out.csv"));
        assert!(matches!(result, Err(DataLoadError::MissingColumn { .. })));
    }
}
