use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use std::{net::SocketAddr, str::FromStr};
use tower_http::cors::CorsLayer;

use crate::{
    api, chromatic::ChromaticService, config::Settings, error, info, management::CacheGateway,
    warning,
};

/// Shared handler state. Cheap to clone; the service holds its parts in `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub service: ChromaticService,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: ChromaticService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}

/// Builds the application router. CORS is only added when an origin is given.
pub fn router(state: AppState, client_origin: Option<&str>) -> Router {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/chromatic/albums", post(api::chromatic_albums))
        .route("/chromatic/groups", post(api::chromatic_groups))
        .route("/get_albums_by_chromaticity", post(api::chromatic_albums))
        .with_state(state);

    match client_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => app.layer(
                CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .allow_credentials(true),
            ),
            Err(e) => {
                warning!("Ignoring invalid client origin '{}': {}", origin, e);
                app
            }
        },
        None => app,
    }
}

pub async fn start_api_server(settings: Settings) {
    let cache = CacheGateway::connect(settings.cache.as_ref()).await;
    let service = match ChromaticService::from_settings(&settings, cache) {
        Ok(service) => service,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    let app = router(AppState::new(service), Some(&settings.client_origin));

    let addr = match SocketAddr::from_str(&settings.server_addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    info!("ChromaticBot backend listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
    }
}
