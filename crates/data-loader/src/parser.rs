//! Row-level parsing and coercion for the movie CSV files.
//!
//! The cleaned dataset is produced by more than one tool over time, so every
//! column is optional here and bad cells coerce to a neutral value instead of
//! failing the whole load:
//! - numeric cells that don't parse become 0
//! - text cells that are missing become empty strings
//! - `main_genre` falls back to the first entry of `genres`, then to `"N/A"`

use crate::types::{Movie, UNKNOWN_GENRE};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// One CSV row exactly as read, before any coercion.
///
/// Columns the file doesn't have deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovieRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub main_genre: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub vote_average: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl RawMovieRow {
    /// Coerce this row into a [`Movie`].
    ///
    /// `year` is taken from the `year` column only; deriving it from
    /// `release_date` is a dataset-wide decision made by the loader.
    pub fn into_movie(self) -> Movie {
        let main_genre = non_empty(self.main_genre.as_deref())
            .map(str::to_string)
            .or_else(|| self.genres.as_deref().and_then(first_genre_name))
            .unwrap_or_else(|| UNKNOWN_GENRE.to_string());

        Movie {
            id: coerce_number(self.id.as_deref()).max(0.0) as u64,
            title: self.title.unwrap_or_default(),
            main_genre,
            vote_average: coerce_number(self.vote_average.as_deref()),
            runtime: coerce_number(self.runtime.as_deref()) as u32,
            year: coerce_number(self.year.as_deref()) as i32,
            overview: self.overview.unwrap_or_default(),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a numeric cell, treating anything unreadable as 0.
///
/// Integer columns are stored as floats by some exporters ("1995.0"), so
/// everything goes through `f64` and callers truncate.
pub fn coerce_number(cell: Option<&str>) -> f64 {
    non_empty(cell)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Extract the year from a `YYYY-MM-DD` release date
pub fn year_from_release_date(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

#[derive(Deserialize)]
struct GenreEntry {
    name: String,
}

/// Return the name of the first genre in a serialized genre list.
///
/// Accepts both JSON (`[{"id": 18, "name": "Drama"}]`) and the Python
/// literal form found in the raw metadata dump
/// (`[{'id': 18, 'name': 'Drama'}]`).
///
/// Example: "[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': 'Comedy'}]" -> Some("Animation")
///          "[]" -> None
pub fn first_genre_name(raw: &str) -> Option<String> {
    if let Ok(entries) = serde_json::from_str::<Vec<GenreEntry>>(raw) {
        return entries.into_iter().next().map(|g| g.name);
    }
    first_literal_name(raw)
}

/// Scan a Python-literal list of dicts for the first `name` value
fn first_literal_name(raw: &str) -> Option<String> {
    let key_at = ["'name'", "\"name\""]
        .iter()
        .filter_map(|key| raw.find(key).map(|i| i + key.len()))
        .min()?;

    let rest = raw[key_at..].trim_start().strip_prefix(':')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &rest[1..];
    let end = body.find(quote)?;

    non_empty(Some(&body[..end])).map(str::to_string)
}
