use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ChromaticError, Result};

/// Downloads album artwork.
#[async_trait]
pub trait ArtworkFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Clone)]
pub struct HttpArtworkFetcher {
    client: Client,
}

impl HttpArtworkFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtworkFetcher for HttpArtworkFetcher {
    /// Single GET, kept in memory. Non-success statuses are failures.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ChromaticError::ImageFetchFailure(format!("{}: {}", url, e)))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ChromaticError::ImageFetchFailure(format!("{}: {}", url, e)))?;

        Ok(bytes.to_vec())
    }
}
