//! User preferences and the parsers for each preference dimension.
//!
//! Preferences arrive as free text straight from a form. Each dimension has
//! its own parser; an absent or empty field disables the dimension, and a
//! field that fails to parse is reported as an error so that callers can
//! decide whether to log it before disabling the dimension.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Upper bound for the single-value rating window (just above the 0-10 scale)
pub const MAX_RATING_BOUND: f64 = 10.1;

/// A preference string that could not be understood
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferenceParseError {
    #[error("Invalid year range format: {0}")]
    InvalidYearRange(String),

    #[error("Invalid rating value: {0}")]
    InvalidRating(String),

    #[error("Unknown duration bucket: {0}")]
    UnknownDuration(String),
}

// =============================================================================
// UserPreferences
// =============================================================================

/// What the user asked for. Every field is optional and independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Exact, case-sensitive main genre
    #[serde(default)]
    pub genre: Option<String>,
    /// Either a single rating ("7") or an inclusive range ("6-8")
    #[serde(default)]
    pub rating: Option<String>,
    /// Duration bucket code: "60", "90", "120", "150" or "180"
    #[serde(default)]
    pub duration: Option<String>,
    /// Either ">=YEAR" or "START-END"
    #[serde(default)]
    pub year_range: Option<String>,
}

impl UserPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_year_range(mut self, year_range: impl Into<String>) -> Self {
        self.year_range = Some(year_range.into());
        self
    }

    /// Requested genre, if any
    pub fn genre(&self) -> Option<&str> {
        present(&self.genre)
    }

    /// Year window, if one was given. `Some(Err(_))` means it was malformed.
    pub fn year_range(&self) -> Option<Result<YearRange, PreferenceParseError>> {
        present(&self.year_range).map(str::parse)
    }

    /// Rating window used for filtering
    pub fn rating_range(&self) -> Option<Result<RatingRange, PreferenceParseError>> {
        present(&self.rating).map(str::parse)
    }

    /// Rating used as the scoring target. Only a single finite number
    /// qualifies; a range ("6-8") yields `None`.
    pub fn target_rating(&self) -> Option<f64> {
        present(&self.rating)
            .and_then(|r| r.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite())
    }

    /// Duration bucket, if one was given
    pub fn duration(&self) -> Option<Result<DurationBucket, PreferenceParseError>> {
        present(&self.duration).map(str::parse)
    }

    /// True when no dimension is active
    pub fn is_empty(&self) -> bool {
        [&self.genre, &self.rating, &self.duration, &self.year_range]
            .into_iter()
            .all(|field| present(field).is_none())
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// =============================================================================
// YearRange
// =============================================================================

/// A release-year window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearRange {
    /// `>=YEAR`
    AtLeast(i32),
    /// `START-END`, inclusive on both ends
    Between(i32, i32),
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearRange::AtLeast(threshold) => year >= threshold,
            YearRange::Between(start, end) => start <= year && year <= end,
        }
    }

    /// How far a year is from what the window asks for.
    ///
    /// Open-ended windows only penalise years before the threshold; closed
    /// windows measure from their midpoint.
    pub fn distance(&self, year: i32) -> f64 {
        match *self {
            YearRange::AtLeast(threshold) => (threshold as f64 - year as f64).max(0.0),
            YearRange::Between(start, end) => {
                let midpoint = (start as f64 + end as f64) / 2.0;
                (year as f64 - midpoint).abs()
            }
        }
    }
}

impl FromStr for YearRange {
    type Err = PreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PreferenceParseError::InvalidYearRange(s.to_string());

        if s.contains(">=") {
            let threshold = s
                .split(">=")
                .nth(1)
                .and_then(|t| t.trim().parse::<i32>().ok())
                .ok_or_else(invalid)?;
            return Ok(YearRange::AtLeast(threshold));
        }

        let (start, end) = parse_pair::<i32>(s).ok_or_else(invalid)?;
        Ok(YearRange::Between(start, end))
    }
}

// =============================================================================
// RatingRange
// =============================================================================

/// A vote-average window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RatingRange {
    /// `LOW-HIGH`, inclusive on both ends
    Between(f64, f64),
    /// A single value `v`: the half-open window `[v, min(v + 1, 10.1))`
    Around(f64),
}

impl RatingRange {
    pub fn contains(&self, vote_average: f64) -> bool {
        match *self {
            RatingRange::Between(low, high) => low <= vote_average && vote_average <= high,
            RatingRange::Around(value) => {
                let high = (value + 1.0).min(MAX_RATING_BOUND);
                value <= vote_average && vote_average < high
            }
        }
    }
}

impl FromStr for RatingRange {
    type Err = PreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PreferenceParseError::InvalidRating(s.to_string());

        if s.contains('-') {
            let (low, high) = parse_pair::<f64>(s)
                .filter(|(low, high)| low.is_finite() && high.is_finite())
                .ok_or_else(invalid)?;
            return Ok(RatingRange::Between(low, high));
        }

        // "inf" and "NaN" parse as f64 but can never match a vote average
        let value = s
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(invalid)?;
        Ok(RatingRange::Around(value))
    }
}

/// Parse `"A-B"` into exactly two values
fn parse_pair<T: FromStr>(s: &str) -> Option<(T, T)> {
    let mut parts = s.split('-');
    let first = parts.next()?.trim().parse().ok()?;
    let second = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

// =============================================================================
// DurationBucket
// =============================================================================

/// One of the five fixed runtime buckets, identified by its form code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    /// Code "60": under 90 minutes
    Short,
    /// Code "90": 90 to 119 minutes
    Standard,
    /// Code "120": 120 to 149 minutes
    Long,
    /// Code "150": 150 to 179 minutes
    VeryLong,
    /// Code "180": 180 minutes and over
    Epic,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::Short,
        DurationBucket::Standard,
        DurationBucket::Long,
        DurationBucket::VeryLong,
        DurationBucket::Epic,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            DurationBucket::Short => "60",
            DurationBucket::Standard => "90",
            DurationBucket::Long => "120",
            DurationBucket::VeryLong => "150",
            DurationBucket::Epic => "180",
        }
    }

    /// Half-open runtime interval `[low, high)`; `None` means unbounded
    pub fn runtime_bounds(&self) -> (u32, Option<u32>) {
        match self {
            DurationBucket::Short => (0, Some(90)),
            DurationBucket::Standard => (90, Some(120)),
            DurationBucket::Long => (120, Some(150)),
            DurationBucket::VeryLong => (150, Some(180)),
            DurationBucket::Epic => (180, None),
        }
    }

    pub fn contains(&self, runtime: u32) -> bool {
        let (low, high) = self.runtime_bounds();
        runtime >= low && high.is_none_or(|high| runtime < high)
    }

    /// Representative runtime used when scoring
    pub fn target_runtime(&self) -> f64 {
        match self {
            DurationBucket::Short => 75.0,
            DurationBucket::Standard => 105.0,
            DurationBucket::Long => 135.0,
            DurationBucket::VeryLong => 165.0,
            DurationBucket::Epic => 200.0,
        }
    }
}

impl FromStr for DurationBucket {
    type Err = PreferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DurationBucket::ALL
            .into_iter()
            .find(|bucket| bucket.code() == s)
            .ok_or_else(|| PreferenceParseError::UnknownDuration(s.to_string()))
    }
}
