#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chromabot::{
    chromatic::{AlbumAggregator, ChromaticService, ColorExtractor, Extraction},
    error::{ChromaticError, Result},
    management::CacheGateway,
    spotify::{artwork::ArtworkFetcher, tracks::TrackSource},
    types::{Image, Rgb, Track, TrackAlbum, TrackArtist},
    utils::Term,
};

pub const ARTWORK_HOST: &str = "https://img.test";

/// Track whose album artwork URL encodes `color`, e.g.
/// `https://img.test/A1/255-0-0`.
pub fn track(name: &str, album_id: &str, color: Rgb, artists: &[&str]) -> Track {
    Track {
        id: Some(format!("track-{}", name)),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                id: None,
                name: a.to_string(),
            })
            .collect(),
        album: TrackAlbum {
            id: album_id.to_string(),
            name: format!("Album {}", album_id),
            images: vec![Image {
                url: artwork_url(album_id, color),
                height: Some(640),
                width: Some(640),
            }],
        },
    }
}

pub fn artwork_url(album_id: &str, color: Rgb) -> String {
    format!(
        "{}/{}/{}-{}-{}",
        ARTWORK_HOST, album_id, color.0, color.1, color.2
    )
}

type Failure = Box<dyn Fn() -> ChromaticError + Send + Sync>;

/// Serves a fixed track list, or always fails.
pub struct StubTrackSource {
    tracks: Vec<Track>,
    failure: Option<Failure>,
    pub calls: Mutex<Vec<(String, Term, u32)>>,
}

impl StubTrackSource {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(failure: impl Fn() -> ChromaticError + Send + Sync + 'static) -> Self {
        Self {
            tracks: Vec::new(),
            failure: Some(Box::new(failure)),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TrackSource for StubTrackSource {
    async fn top_tracks(&self, token: &str, term: Term, limit: u32) -> Result<Vec<Track>> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), term, limit));

        match &self.failure {
            Some(failure) => Err(failure()),
            None => Ok(self.tracks.iter().take(limit as usize).cloned().collect()),
        }
    }
}

/// Returns the URL itself as the "image" and counts calls.
#[derive(Default)]
pub struct CountingArtwork {
    pub fetches: AtomicUsize,
    pub fail_for: Option<String>,
}

impl CountingArtwork {
    pub fn failing_for(album_id: &str) -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            fail_for: Some(album_id.to_string()),
        }
    }

    pub fn count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtworkFetcher for CountingArtwork {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(album_id) = &self.fail_for {
            if url.contains(&format!("/{}/", album_id)) {
                return Err(ChromaticError::ImageFetchFailure(format!("{}: 404", url)));
            }
        }
        Ok(url.as_bytes().to_vec())
    }
}

/// Reads the color back out of an artwork URL produced by [`artwork_url`];
/// the palette is that color six times.
pub struct UrlColorExtractor;

impl ColorExtractor for UrlColorExtractor {
    fn extract(&self, image: &[u8]) -> Result<Extraction> {
        let url = std::str::from_utf8(image)
            .map_err(|e| ChromaticError::ExtractionFailure(e.to_string()))?;
        let channels: Vec<u8> = url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .split('-')
            .filter_map(|c| c.parse().ok())
            .collect();

        match channels.as_slice() {
            [r, g, b] => {
                let dominant = Rgb(*r, *g, *b);
                Ok(Extraction {
                    palette: vec![dominant; 6],
                    dominant,
                })
            }
            _ => Err(ChromaticError::ExtractionFailure(format!(
                "no color in {}",
                url
            ))),
        }
    }
}

pub fn aggregator(cache: CacheGateway, artwork: Arc<CountingArtwork>) -> AlbumAggregator {
    AlbumAggregator::new(cache, artwork, Arc::new(UrlColorExtractor))
}

pub fn service(
    tracks: Arc<StubTrackSource>,
    cache: CacheGateway,
    artwork: Arc<CountingArtwork>,
) -> ChromaticService {
    ChromaticService::new(tracks, aggregator(cache, artwork))
}
