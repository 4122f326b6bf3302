//! # Spotify integration
//!
//! The two outbound capabilities of the backend:
//!
//! - [`tracks`] - the listener's top tracks for a ranking window, authorized
//!   with the bearer token the client forwarded
//! - [`artwork`] - downloading album artwork so its colors can be extracted
//!
//! Both sit behind traits ([`tracks::TrackSource`], [`artwork::ArtworkFetcher`])
//! so the chromatic pipeline can run against any source. Every call is made
//! exactly once with the configured timeout; failures are surfaced as
//! [`crate::error::ChromaticError`] right away, there is no retry.

use std::time::Duration;

use reqwest::Client;

pub mod artwork;
pub mod tracks;

/// HTTP client shared by all outbound calls.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
