use std::{collections::HashMap, sync::Arc};

use crate::{
    chromatic::extract::ColorExtractor,
    error::{ChromaticError, Result},
    management::CacheGateway,
    spotify::artwork::ArtworkFetcher,
    types::{Album, ColorAnalysis, Song, Track, TrackAlbum},
    utils,
};

/// Folds a ranked track list into albums.
///
/// Albums come out in the order their first track appears; every later track
/// of the same album is appended to that album's song list. Color analysis is
/// resolved once per album, from the cache when possible and from the artwork
/// otherwise. Any artwork or extraction failure aborts the whole run.
#[derive(Clone)]
pub struct AlbumAggregator {
    cache: CacheGateway,
    artwork: Arc<dyn ArtworkFetcher>,
    extractor: Arc<dyn ColorExtractor>,
}

impl AlbumAggregator {
    pub fn new(
        cache: CacheGateway,
        artwork: Arc<dyn ArtworkFetcher>,
        extractor: Arc<dyn ColorExtractor>,
    ) -> Self {
        Self {
            cache,
            artwork,
            extractor,
        }
    }

    pub async fn aggregate(&self, tracks: &[Track]) -> Result<Vec<Album>> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut albums: Vec<Album> = Vec::new();

        for track in tracks {
            let position = match positions.get(track.album.id.as_str()) {
                Some(position) => *position,
                None => {
                    let analysis = self.resolve(&track.album).await?;
                    albums.push(Album {
                        id: track.album.id.clone(),
                        name: track.album.name.clone(),
                        image: track.album.artwork_url().unwrap_or_default().to_string(),
                        songs: Vec::new(),
                        analysis,
                    });
                    positions.insert(track.album.id.as_str(), albums.len() - 1);
                    albums.len() - 1
                }
            };

            albums[position].songs.push(Song {
                name: track.name.clone(),
                artists: utils::join_artists(&track.artists),
            });
        }

        Ok(albums)
    }

    async fn resolve(&self, album: &TrackAlbum) -> Result<ColorAnalysis> {
        if let Some(cached) = self.cache.get(&album.id).await {
            return Ok(cached);
        }

        let url = album.artwork_url().ok_or_else(|| {
            ChromaticError::ImageFetchFailure(format!("album {} has no artwork", album.id))
        })?;
        let bytes = self.artwork.fetch(url).await?;

        let extractor = Arc::clone(&self.extractor);
        let extraction = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| ChromaticError::ExtractionFailure(e.to_string()))??;

        let analysis = ColorAnalysis::from_extraction(extraction.palette, extraction.dominant);
        self.cache
            .put(&album.id, analysis.dominant, &analysis.palette, analysis.hue)
            .await;

        Ok(analysis)
    }
}
