//! Configuration for the ChromaticBot backend.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`<data_local_dir>/chromabot/.env`)
//! 3. `.env` in the working directory
//! 4. Built-in defaults
//!
//! Unlike the other settings, the color cache is optional: it is enabled only
//! when `DB_URL`, `DB_NAME` and `DB_COLLECTION` are all present.

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:4200";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// Creates `<data_local_dir>/chromabot/` if needed and loads the `.env` found
/// there, then the one in the working directory. Variables already present in
/// the environment are never overwritten, and a missing file is not an error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chromabot/.env");
    path
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Address the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`), without a trailing slash.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Browser origin allowed by CORS (`CLIENT_ORIGIN`).
pub fn client_origin() -> String {
    var_or("CLIENT_ORIGIN", DEFAULT_CLIENT_ORIGIN)
}

/// Timeout applied to every outbound request (`HTTP_TIMEOUT_SECS`).
pub fn http_timeout() -> Duration {
    let secs = optional_var("HTTP_TIMEOUT_SECS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Bearer token used by the console commands when `--token` is omitted
/// (`SPOTIFY_TOKEN`). The HTTP server never reads it.
pub fn spotify_token() -> Option<String> {
    optional_var("SPOTIFY_TOKEN")
}

/// Document store coordinates for the color cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub url: String,
    pub name: String,
    pub collection: String,
}

/// Returns the cache coordinates when all of `DB_URL`, `DB_NAME` and
/// `DB_COLLECTION` are set, `None` otherwise.
pub fn cache_settings() -> Option<CacheSettings> {
    Some(CacheSettings {
        url: optional_var("DB_URL")?,
        name: optional_var("DB_NAME")?,
        collection: optional_var("DB_COLLECTION")?,
    })
}

/// Snapshot of the whole configuration, taken once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_addr: String,
    pub spotify_api_url: String,
    pub client_origin: String,
    pub http_timeout: Duration,
    pub cache: Option<CacheSettings>,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            server_addr: server_addr(),
            spotify_api_url: spotify_apiurl(),
            client_origin: client_origin(),
            http_timeout: http_timeout(),
            cache: cache_settings(),
        }
    }
}
