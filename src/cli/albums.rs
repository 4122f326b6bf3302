use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    chromatic::ChromaticService,
    config::{self, Settings},
    error,
    management::CacheGateway,
    success,
    types::AlbumTableRow,
    utils::{self, SortMode, Term},
    warning,
};

pub async fn albums(token: Option<String>, term: Term, quantity: i64, sort: Option<String>) {
    let (service, token, limit) = prepare(token, quantity).await;
    let sort = SortMode::parse_lossy(sort.as_deref());

    let pb = spinner(format!("Analysing the artwork of your {} top tracks...", limit));
    let result = service.albums(&token, term, limit, sort).await;
    pb.finish_and_clear();

    match result {
        Ok(albums) => {
            if albums.is_empty() {
                warning!("No tracks returned for {}", term);
                return;
            }

            let rows: Vec<AlbumTableRow> = albums.iter().map(AlbumTableRow::from).collect();
            println!("{}", Table::new(rows));
            success!("{} albums sorted by {}", albums.len(), sort);
        }
        Err(e) => error!("Cannot load albums. Err: {}", e),
    }
}

pub async fn groups(token: Option<String>, term: Term, quantity: i64, threshold: Option<f64>) {
    let threshold = match crate::chromatic::service::validate_threshold(threshold) {
        Ok(t) => t,
        Err(e) => error!("{}", e),
    };
    let (service, token, limit) = prepare(token, quantity).await;

    let pb = spinner(format!("Grouping the albums of your {} top tracks...", limit));
    let result = service.groups(&token, term, limit, threshold).await;
    pb.finish_and_clear();

    match result {
        Ok(groups) => {
            for (i, group) in groups.iter().enumerate() {
                println!("Group {} ({} albums)", i + 1, group.len());
                let rows: Vec<AlbumTableRow> = group.iter().map(AlbumTableRow::from).collect();
                println!("{}", Table::new(rows));
            }
            success!("{} groups at threshold {}", groups.len(), threshold);
        }
        Err(e) => error!("Cannot group albums. Err: {}", e),
    }
}

async fn prepare(token: Option<String>, quantity: i64) -> (ChromaticService, String, u32) {
    let Some(token) = token.or_else(config::spotify_token) else {
        error!("No access token. Pass --token or set SPOTIFY_TOKEN");
    };

    let limit = match utils::validate_quantity(quantity) {
        Ok(limit) => limit,
        Err(e) => error!("{}", e),
    };

    let settings = Settings::from_env();
    let cache = CacheGateway::connect(settings.cache.as_ref()).await;
    let service = match ChromaticService::from_settings(&settings, cache) {
        Ok(service) => service,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    (service, token, limit)
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
