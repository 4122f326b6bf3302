//! Error taxonomy for the chromatic pipeline.
//!
//! Every failure that aborts a request maps to a distinct HTTP status. The
//! only non-fatal variant is [`ChromaticError::CacheUnavailable`], which the
//! cache gateway logs and swallows.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChromaticError {
    /// Bad time-revision code, out-of-range quantity, ...
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Spotify rejected the bearer token.
    #[error("Invalid or expired access token")]
    UpstreamUnauthorized,

    /// Spotify answered, but not with a usable result.
    #[error("Spotify API error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    /// Spotify could not be reached at all.
    #[error("Failed to connect to Spotify API: {0}")]
    UpstreamUnavailable(String),

    /// Album artwork could not be downloaded.
    #[error("Failed to fetch album artwork: {0}")]
    ImageFetchFailure(String),

    /// Artwork bytes could not be turned into a palette.
    #[error("Failed to extract colors: {0}")]
    ExtractionFailure(String),

    /// The color cache is not usable. Logged, never returned to a client.
    #[error("Color cache unavailable: {0}")]
    CacheUnavailable(String),
}

pub type Result<T> = std::result::Result<T, ChromaticError>;

impl ChromaticError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChromaticError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            ChromaticError::UpstreamUnauthorized => StatusCode::UNAUTHORIZED,
            ChromaticError::UpstreamError { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ChromaticError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ChromaticError::ImageFetchFailure(_) => StatusCode::BAD_GATEWAY,
            ChromaticError::ExtractionFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ChromaticError::CacheUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ChromaticError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
