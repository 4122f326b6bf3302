use std::{fmt, str::FromStr};

use crate::{
    error::{ChromaticError, Result},
    types::TrackArtist,
};

pub const MIN_QUANTITY_SONGS: i64 = 1;
pub const MAX_QUANTITY_SONGS: i64 = 50;

/// Upstream ranking window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Short,
    Medium,
    Long,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::Short, Term::Medium, Term::Long];

    /// Client-facing code: `1m`, `6m` or `a`.
    pub fn code(&self) -> &'static str {
        match self {
            Term::Short => "1m",
            Term::Medium => "6m",
            Term::Long => "a",
        }
    }

    /// Spotify's `time_range` value.
    pub fn as_time_range(&self) -> &'static str {
        match self {
            Term::Short => "short_term",
            Term::Medium => "medium_term",
            Term::Long => "long_term",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_time_range())
    }
}

impl FromStr for Term {
    type Err = ChromaticError;

    fn from_str(s: &str) -> Result<Self> {
        Term::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Term::ALL.iter().map(|t| t.code()).collect();
                ChromaticError::InvalidParameter(format!(
                    "invalid time revision '{}'. Must be one of: {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

/// Criterion the aggregated albums are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Hue,
    Saturation,
    Brightness,
}

impl SortMode {
    /// Parses a client supplied mode, matched exactly. Anything else (or
    /// nothing at all) falls back to [`SortMode::Hue`].
    pub fn parse_lossy(mode: Option<&str>) -> SortMode {
        match mode {
            Some("saturation") => SortMode::Saturation,
            Some("brightness") => SortMode::Brightness,
            _ => SortMode::Hue,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortMode::Hue => "hue",
            SortMode::Saturation => "saturation",
            SortMode::Brightness => "brightness",
        };
        f.write_str(s)
    }
}

/// Checks `quantitySongs` against the upstream limit window.
pub fn validate_quantity(quantity: i64) -> Result<u32> {
    if (MIN_QUANTITY_SONGS..=MAX_QUANTITY_SONGS).contains(&quantity) {
        Ok(quantity as u32)
    } else {
        Err(ChromaticError::InvalidParameter(format!(
            "quantitySongs must be between {} and {}, got {}",
            MIN_QUANTITY_SONGS, MAX_QUANTITY_SONGS, quantity
        )))
    }
}

/// Comma-space joined artist names, as shown next to a song.
pub fn join_artists(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Clap value parser for `--time-revision`.
pub fn parse_term(s: &str) -> std::result::Result<Term, String> {
    s.parse::<Term>().map_err(|e| e.to_string())
}
