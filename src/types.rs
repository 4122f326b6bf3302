use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// An 8-bit RGB triple. Serializes as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn channels(&self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// --- Spotify wire types -----------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `null` for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl TrackAlbum {
    /// The first (largest) artwork URL, if Spotify sent any.
    pub fn artwork_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

// --- Domain types -----------------------------------------------------------

/// Palette, dominant color and the perceptual attributes derived from it.
///
/// `hue`, `saturation` and `brightness` always come from `dominant` through
/// [`crate::chromatic::metrics`]; `color_names[i]` is the classification of
/// `palette[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAnalysis {
    pub palette: Vec<Rgb>,
    pub dominant: Rgb,
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub color_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub artists: String,
}

/// One album assembled from the track list, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub image: String,
    pub songs: Vec<Song>,
    pub analysis: ColorAnalysis,
}

/// Cache document layout, one per album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumColorDocument {
    pub id_album: String,
    pub dominant_color: Rgb,
    pub palette_colors: Vec<Rgb>,
    pub colorfulness: f64,
}

// --- HTTP request / response ------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromaticityRequest {
    pub token: String,
    #[serde(rename = "timeRevision")]
    pub time_revision: String,
    #[serde(rename = "quantitySongs")]
    pub quantity_songs: i64,
    #[serde(default)]
    pub sort_mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingRequest {
    pub token: String,
    #[serde(rename = "timeRevision")]
    pub time_revision: String,
    #[serde(rename = "quantitySongs")]
    pub quantity_songs: i64,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumChromaticInfo {
    pub album: String,
    pub image: String,
    pub colors: Vec<Rgb>,
    pub dominant: Rgb,
    pub color_names: Vec<String>,
    pub colorfulness: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub songs: Vec<Song>,
}

impl From<Album> for AlbumChromaticInfo {
    fn from(album: Album) -> Self {
        AlbumChromaticInfo {
            album: album.name,
            image: album.image,
            colors: album.analysis.palette,
            dominant: album.analysis.dominant,
            color_names: album.analysis.color_names,
            colorfulness: album.analysis.hue,
            saturation: album.analysis.saturation,
            brightness: album.analysis.brightness,
            songs: album.songs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: i64,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub album: String,
    pub dominant: String,
    pub hue: String,
    pub saturation: String,
    pub brightness: String,
    pub colors: String,
    pub songs: usize,
}

impl From<&Album> for AlbumTableRow {
    fn from(album: &Album) -> Self {
        AlbumTableRow {
            album: album.name.clone(),
            dominant: album.analysis.dominant.to_hex(),
            hue: format!("{:.3}", album.analysis.hue),
            saturation: format!("{:.3}", album.analysis.saturation),
            brightness: format!("{:.3}", album.analysis.brightness),
            colors: album.analysis.color_names.join(","),
            songs: album.songs.len(),
        }
    }
}
