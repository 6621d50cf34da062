//! One-shot HTTP fetch of a published contract descriptor document.

use anyhow::anyhow;
use std::time::Duration;

use crate::http::{build_agent, default_timeouts};

/// Why a descriptor document could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum DescriptorFetchError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Network(#[source] anyhow::Error),
    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),
}

/// Source of raw descriptor documents, keyed by URL.
#[async_trait::async_trait]
pub trait DescriptorFetcher: Send + Sync {
    /// GET `url` and return the response body.
    async fn fetch_descriptor(&self, url: &str) -> Result<String, DescriptorFetchError>;
}

/// Plain HTTP GET over a `ureq` agent.
#[derive(Clone)]
pub struct HttpDescriptorFetcher {
    agent: ureq::Agent,
}

impl HttpDescriptorFetcher {
    pub fn new() -> Self {
        let (timeout, connect_timeout) = default_timeouts();
        Self::with_timeouts(timeout, connect_timeout)
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout, connect_timeout),
        }
    }

    fn get(&self, url: &str) -> Result<String, DescriptorFetchError> {
        match self.agent.get(url).call() {
            Ok(response) => response.into_string().map_err(|e| {
                DescriptorFetchError::Network(anyhow!("failed to read body of {}: {}", url, e))
            }),
            Err(ureq::Error::Status(code, _)) => Err(DescriptorFetchError::Status(code)),
            Err(e) => Err(DescriptorFetchError::Network(anyhow!("GET {}: {}", url, e))),
        }
    }
}

impl Default for HttpDescriptorFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DescriptorFetcher for HttpDescriptorFetcher {
    async fn fetch_descriptor(&self, url: &str) -> Result<String, DescriptorFetchError> {
        let fetcher = self.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || fetcher.get(&url))
            .await
            .map_err(|e| DescriptorFetchError::Network(anyhow!("descriptor task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DescriptorFetchError::Status(404).to_string(), "HTTP status 404");
        let err = DescriptorFetchError::Network(anyhow!("connection refused"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let fetcher =
            HttpDescriptorFetcher::with_timeouts(Duration::from_secs(2), Duration::from_secs(1));
        let err = fetcher
            .fetch_descriptor("http://127.0.0.1:1/devnet.json")
            .await
            .unwrap_err();
        assert!(matches!(err, DescriptorFetchError::Network(_)));
    }
}
