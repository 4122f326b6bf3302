//! # Chromatic analysis
//!
//! The data-transformation core: from a ranked list of tracks to albums
//! described and ordered by the colors of their artwork.
//!
//! ```text
//! TrackSource ──> AlbumAggregator ──> sort_albums ──> response
//!                   │   ├── CacheGateway (optional)
//!                   │   ├── ArtworkFetcher
//!                   │   └── ColorExtractor
//!                   └── metrics + classify
//! ```
//!
//! [`histogram`] holds the older strategy that groups similar albums instead
//! of sorting them; [`service::ChromaticService`] offers both.

pub mod aggregate;
pub mod classify;
pub mod extract;
pub mod histogram;
pub mod metrics;
pub mod service;
pub mod sort;

pub use aggregate::AlbumAggregator;
pub use classify::classify;
pub use extract::{ColorExtractor, Extraction, ColorThiefExtractor};
pub use metrics::metrics;
pub use service::ChromaticService;
pub use sort::sort_albums;

use crate::types::{ColorAnalysis, Rgb};

impl ColorAnalysis {
    /// Full analysis of a freshly extracted palette: hue, saturation and
    /// brightness all come from `dominant`.
    pub fn from_extraction(palette: Vec<Rgb>, dominant: Rgb) -> Self {
        let colorfulness = metrics(dominant).hue;
        Self::from_colorfulness(palette, dominant, colorfulness)
    }

    /// Analysis with a known colorfulness (the stored hue), as read back from
    /// the cache. Saturation, brightness and names are derived again.
    pub fn from_colorfulness(palette: Vec<Rgb>, dominant: Rgb, colorfulness: f64) -> Self {
        let hsv = metrics(dominant);
        ColorAnalysis {
            color_names: classify::classify_palette(&palette),
            palette,
            dominant,
            hue: colorfulness,
            saturation: hsv.saturation,
            brightness: hsv.brightness,
        }
    }
}
