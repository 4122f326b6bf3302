use std::sync::Arc;

use crate::{
    config::CacheSettings,
    info,
    management::documents::{DocumentStore, open_store},
    types::{AlbumColorDocument, ColorAnalysis, Rgb},
    warning,
};

/// Per-album color cache in front of an optional document store.
///
/// Without a store the gateway is disabled: `get` always misses and `put` does
/// nothing. The same happens for individual store failures, which are logged
/// and never reach the caller. Whether a store exists is decided once, when the
/// gateway is built.
#[derive(Clone, Default)]
pub struct CacheGateway {
    store: Option<Arc<dyn DocumentStore>>,
}

impl CacheGateway {
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Opens the configured store, or falls back to a disabled gateway.
    pub async fn connect(settings: Option<&CacheSettings>) -> Self {
        let Some(settings) = settings else {
            info!("Document store variables not provided - running without cache");
            return Self::disabled();
        };

        match open_store(settings).await {
            Ok(store) => {
                info!("Color cache enabled ({})", store.describe());
                Self::new(Arc::from(store))
            }
            Err(e) => {
                warning!("{} - running without cache", e);
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Cached analysis for `album_id`.
    ///
    /// Only dominant color, palette and colorfulness are stored; saturation,
    /// brightness and color names are derived again on every hit.
    pub async fn get(&self, album_id: &str) -> Option<ColorAnalysis> {
        let store = self.store.as_ref()?;

        match store.find_one(album_id).await {
            Ok(document) => document.map(|d| {
                ColorAnalysis::from_colorfulness(d.palette_colors, d.dominant_color, d.colorfulness)
            }),
            Err(e) => {
                warning!("Color cache lookup for album {} failed: {}", album_id, e);
                None
            }
        }
    }

    pub async fn put(&self, album_id: &str, dominant: Rgb, palette: &[Rgb], colorfulness: f64) {
        let Some(store) = self.store.as_ref() else {
            return;
        };

        let document = AlbumColorDocument {
            id_album: album_id.to_string(),
            dominant_color: dominant,
            palette_colors: palette.to_vec(),
            colorfulness,
        };

        if let Err(e) = store.insert_one(&document).await {
            warning!("Color cache write for album {} failed: {}", album_id, e);
        }
    }

    /// Every cached document, ordered by album id. Empty when disabled.
    pub async fn list(&self) -> Vec<AlbumColorDocument> {
        let Some(store) = self.store.as_ref() else {
            return Vec::new();
        };

        store.find_all().await.unwrap_or_else(|e| {
            warning!("Color cache listing failed: {}", e);
            Vec::new()
        })
    }

    /// Drops the cached analysis of one album. Returns whether one existed.
    pub async fn forget(&self, album_id: &str) -> bool {
        let Some(store) = self.store.as_ref() else {
            return false;
        };

        store.delete_one(album_id).await.unwrap_or_else(|e| {
            warning!("Color cache delete for album {} failed: {}", album_id, e);
            false
        })
    }
}
