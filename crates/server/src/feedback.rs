//! Persistent feedback storage.
//!
//! All feedback lives in one pretty-printed JSON array. Every append reads
//! the whole file, pushes one record and rewrites it. Reads and writes share
//! one mutex, so a reader never sees a half-written file. The calls block,
//! so async callers should go through `spawn_blocking`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use data_loader::Movie;

#[derive(Error, Debug)]
pub enum FeedbackStoreError {
    #[error("Feedback file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Feedback serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feedback store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, FeedbackStoreError>;

/// Snapshot of the movie at the time feedback was given
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub runtime: u32,
    #[serde(default)]
    pub vote_average: f64,
}

/// One stored piece of feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub movie_title: String,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    /// Local ISO-8601 time the feedback was submitted
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub movie_details: MovieDetails,
}

impl FeedbackRecord {
    /// Build a record for `movie`, stamped with the current local time
    pub fn for_movie(movie: &Movie, rating: i32, comment: Option<String>) -> Self {
        Self {
            movie_title: movie.title.clone(),
            rating,
            comment: comment.unwrap_or_default(),
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            movie_details: MovieDetails {
                year: movie.year,
                genre: movie.main_genre.clone(),
                runtime: movie.runtime,
                vote_average: movie.vote_average,
            },
        }
    }
}

#[derive(Debug)]
pub struct FeedbackStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record.
    ///
    /// A missing or empty file is an empty store. A file that is not valid
    /// JSON is logged and also treated as empty.
    pub fn load(&self) -> Result<Vec<FeedbackRecord>> {
        let _guard = self.lock.lock().map_err(|_| FeedbackStoreError::Poisoned)?;
        self.read_records()
    }

    fn read_records(&self) -> Result<Vec<FeedbackRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                error!("Error loading feedback from {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    /// Append one record and rewrite the file
    pub fn append(&self, record: FeedbackRecord) -> Result<()> {
        let _guard = self.lock.lock().map_err(|_| FeedbackStoreError::Poisoned)?;

        let mut records = self.read_records()?;
        let title = record.movie_title.clone();
        records.push(record);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;

        info!("Feedback submitted for movie: {}", title);
        Ok(())
    }

    /// Feedback for one title (exact match), newest first
    pub fn query_by_title(&self, title: &str) -> Result<Vec<FeedbackRecord>> {
        let mut matching: Vec<FeedbackRecord> = self
            .load()?
            .into_iter()
            .filter(|record| record.movie_title == title)
            .collect();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(matching)
    }
}
