use async_trait::async_trait;
use bytes::Bytes;

use super::protocol::value_url;
use super::types::PeerFetcher;
use crate::error::CacheError;

/// HTTP client bound to one remote peer.
///
/// No retries happen here: any failure is returned to the group, which falls
/// back to loading the key locally.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    /// Peer address plus base path, e.g. `http://10.0.0.2:8008/_geecache/`.
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http_client,
        }
    }
}

#[async_trait]
impl PeerFetcher for HttpFetcher {
    async fn fetch(&self, group: &str, key: &str) -> Result<Bytes, CacheError> {
        let url = value_url(&self.base_url, group, key)?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CacheError::PeerTransport {
                peer: self.base_url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(CacheError::PeerStatus {
                peer: self.base_url.clone(),
                status: response.status().to_string(),
            });
        }

        response.bytes().await.map_err(|e| CacheError::PeerTransport {
            peer: self.base_url.clone(),
            reason: format!("reading response body: {}", e),
        })
    }

    fn peer(&self) -> &str {
        &self.base_url
    }
}
