//! Error taxonomy of the resolver.
//!
//! Absence is never an error: unregistered names, missing dynamic fields and
//! stale reverse claims come back as empty records or `None`. What remains is
//! configuration trouble, bad input, and transport faults, the last of which
//! pass through untouched.

use suins_transport::DescriptorFetchError;

/// Bootstrap could not produce a usable contract descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Error getting SuiNS contract objects from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: DescriptorFetchError,
    },
    #[error("Network Error: {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("contract descriptor has no {0}")]
    Missing(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("malformed contract descriptor: {0}")]
    DescriptorParse(#[from] serde_json::Error),
    #[error("invalid name {0:?}: expected <label>.<tld>")]
    InvalidName(String),
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ResolverError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ResolverError::Configuration(_) | ResolverError::DescriptorParse(_)
        )
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ResolverError::InvalidName(_) | ResolverError::InvalidAddress(_)
        )
    }
}

pub type Result<T, E = ResolverError> = std::result::Result<T, E>;
