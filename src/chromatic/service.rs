use std::{str::FromStr, sync::Arc};

use crate::{
    Res,
    chromatic::{
        AlbumAggregator, ColorThiefExtractor,
        histogram::{DEFAULT_GROUP_THRESHOLD, group_by_similarity},
        sort_albums,
    },
    config::Settings,
    error::{ChromaticError, Result},
    info,
    management::CacheGateway,
    spotify::{
        artwork::{ArtworkFetcher, HttpArtworkFetcher},
        http_client,
        tracks::{SpotifyTrackSource, TrackSource},
    },
    types::{Album, ChromaticityRequest, GroupingRequest},
    utils::{self, SortMode, Term},
};

/// Entry point of the pipeline, shared by the HTTP handlers and the CLI.
#[derive(Clone)]
pub struct ChromaticService {
    tracks: Arc<dyn TrackSource>,
    aggregator: Arc<AlbumAggregator>,
}

impl ChromaticService {
    pub fn new(tracks: Arc<dyn TrackSource>, aggregator: AlbumAggregator) -> Self {
        Self {
            tracks,
            aggregator: Arc::new(aggregator),
        }
    }

    /// Wires the Spotify-backed sources and the color-thief extractor.
    pub fn from_settings(settings: &Settings, cache: CacheGateway) -> Res<Self> {
        let client = http_client(settings.http_timeout)?;
        let tracks: Arc<dyn TrackSource> = Arc::new(SpotifyTrackSource::new(
            client.clone(),
            settings.spotify_api_url.clone(),
        ));
        let artwork: Arc<dyn ArtworkFetcher> = Arc::new(HttpArtworkFetcher::new(client));
        let aggregator =
            AlbumAggregator::new(cache, artwork, Arc::new(ColorThiefExtractor::default()));

        Ok(Self::new(tracks, aggregator))
    }

    /// Top tracks folded into albums and ordered by `sort`.
    pub async fn albums(
        &self,
        token: &str,
        term: Term,
        limit: u32,
        sort: SortMode,
    ) -> Result<Vec<Album>> {
        let tracks = self.tracks.top_tracks(token, term, limit).await?;
        let mut albums = self.aggregator.aggregate(&tracks).await?;
        sort_albums(&mut albums, sort);

        info!(
            "{} tracks ({}) -> {} albums sorted by {}",
            tracks.len(),
            term,
            albums.len(),
            sort
        );
        Ok(albums)
    }

    /// Top tracks folded into albums, then grouped by palette histogram.
    /// Groups keep first-seen order and are not sorted.
    pub async fn groups(
        &self,
        token: &str,
        term: Term,
        limit: u32,
        threshold: f64,
    ) -> Result<Vec<Vec<Album>>> {
        let tracks = self.tracks.top_tracks(token, term, limit).await?;
        let albums = self.aggregator.aggregate(&tracks).await?;
        let album_count = albums.len();
        let groups = group_by_similarity(albums, threshold, |a| a.analysis.palette.as_slice());

        info!(
            "{} tracks ({}) -> {} albums in {} groups (threshold {})",
            tracks.len(),
            term,
            album_count,
            groups.len(),
            threshold
        );
        Ok(groups)
    }

    pub async fn albums_for_request(&self, request: &ChromaticityRequest) -> Result<Vec<Album>> {
        let term = Term::from_str(&request.time_revision)?;
        let limit = utils::validate_quantity(request.quantity_songs)?;
        let sort = SortMode::parse_lossy(request.sort_mode.as_deref());

        self.albums(&request.token, term, limit, sort).await
    }

    pub async fn groups_for_request(&self, request: &GroupingRequest) -> Result<Vec<Vec<Album>>> {
        let term = Term::from_str(&request.time_revision)?;
        let limit = utils::validate_quantity(request.quantity_songs)?;
        let threshold = validate_threshold(request.threshold)?;

        self.groups(&request.token, term, limit, threshold).await
    }
}

/// Similarity threshold for grouping, defaulting to 0.7 and limited to [0, 1].
pub fn validate_threshold(threshold: Option<f64>) -> Result<f64> {
    let threshold = threshold.unwrap_or(DEFAULT_GROUP_THRESHOLD);
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ChromaticError::InvalidParameter(format!(
            "threshold must be between 0 and 1, got {}",
            threshold
        )))
    }
}
