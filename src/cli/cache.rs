use tabled::{Table, Tabled};

use crate::{
    chromatic::classify, config, info, management::CacheGateway, success, types::Rgb, warning,
};

#[derive(Tabled)]
struct CachedAlbumRow {
    album_id: String,
    dominant: String,
    name: String,
    colorfulness: String,
    palette: String,
}

async fn open_cache() -> Option<CacheGateway> {
    let cache = CacheGateway::connect(config::cache_settings().as_ref()).await;
    if cache.is_enabled() {
        Some(cache)
    } else {
        warning!("Color cache is not configured. Set DB_URL, DB_NAME and DB_COLLECTION");
        None
    }
}

pub async fn list_cache() {
    let Some(cache) = open_cache().await else {
        return;
    };

    let documents = cache.list().await;
    if documents.is_empty() {
        info!("Color cache is empty");
        return;
    }

    let rows: Vec<CachedAlbumRow> = documents
        .iter()
        .map(|d| CachedAlbumRow {
            album_id: d.id_album.clone(),
            dominant: d.dominant_color.to_hex(),
            name: classify(d.dominant_color).to_string(),
            colorfulness: format!("{:.3}", d.colorfulness),
            palette: d
                .palette_colors
                .iter()
                .map(Rgb::to_hex)
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect();

    println!("{}", Table::new(rows));
    success!("{} cached albums", documents.len());
}

pub async fn forget_cache(album_id: String) {
    let Some(cache) = open_cache().await else {
        return;
    };

    if cache.forget(&album_id).await {
        success!("Removed cached colors of album {}", album_id);
    } else {
        warning!("Album {} is not cached", album_id);
    }
}
