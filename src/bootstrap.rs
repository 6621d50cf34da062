//! Contract descriptor bootstrap.
//!
//! The descriptor is resolved at most once per client: either supplied up
//! front or fetched from `<base>/<network>.json` on first use. Later calls
//! read the stored value without touching the network.

use std::sync::Arc;

use parking_lot::RwLock;
use suins_transport::{DescriptorFetchError, DescriptorFetcher};
use suins_types::{ContractDescriptor, Network};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ConfigError, Result};

pub struct ContractBootstrap {
    network: Network,
    url: String,
    fetcher: Arc<dyn DescriptorFetcher>,
    slot: RwLock<Option<Arc<ContractDescriptor>>>,
}

impl ContractBootstrap {
    pub fn new(config: &ClientConfig, fetcher: Arc<dyn DescriptorFetcher>) -> Self {
        let initial = config
            .descriptor
            .clone()
            .filter(ContractDescriptor::is_bootstrapped)
            .map(Arc::new);
        Self {
            network: config.network,
            url: config.descriptor_url(),
            fetcher,
            slot: RwLock::new(initial),
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Where the descriptor is fetched from when none was supplied.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The stored descriptor, if bootstrap already happened.
    pub fn cached(&self) -> Option<Arc<ContractDescriptor>> {
        self.slot
            .read()
            .clone()
            .filter(|descriptor| descriptor.is_bootstrapped())
    }

    pub async fn ensure_descriptor(&self) -> Result<Arc<ContractDescriptor>> {
        if let Some(descriptor) = self.cached() {
            return Ok(descriptor);
        }

        debug!(network = %self.network, url = %self.url, "fetching contract descriptor");
        let body = self
            .fetcher
            .fetch_descriptor(&self.url)
            .await
            .map_err(|e| match e {
                DescriptorFetchError::Status(status) => ConfigError::Status {
                    url: self.url.clone(),
                    status,
                },
                source => ConfigError::Fetch {
                    url: self.url.clone(),
                    source,
                },
            })?;
        let fetched: ContractDescriptor = serde_json::from_str(&body)?;
        if !fetched.is_bootstrapped() {
            warn!(url = %self.url, "contract descriptor has an empty package id");
            return Err(ConfigError::Missing("package id").into());
        }

        let mut slot = self.slot.write();
        match slot.as_ref() {
            Some(existing) if existing.is_bootstrapped() => Ok(existing.clone()),
            _ => {
                let descriptor = Arc::new(fetched);
                *slot = Some(descriptor.clone());
                Ok(descriptor)
            }
        }
    }
}
