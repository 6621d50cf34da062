//! SuiNS name resolution
//!
//! Read-only lookups against the SuiNS registry on a Sui node:
//!
//! - **Forward**: name to target address, or the full [`NameRecord`]
//! - **Reverse**: address to default name, verified against current ownership
//! - **Enrichment**: owner, avatar image and content hash on request
//!
//! See [`SuinsClient`] for the entry points and [`ClientConfig`] for the knobs.

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod error;
pub mod locator;
pub mod normalizer;
pub mod ownership;
pub mod schema;

pub use bootstrap::ContractBootstrap;
pub use client::{ResolveOptions, SuinsClient};
pub use config::ClientConfig;
pub use error::{ConfigError, ResolverError, Result};
pub use locator::{ChildRecord, DynamicFieldLocator, FieldKey};
pub use normalizer::{normalize, CanonicalFields};
pub use ownership::{apply_avatar_rule, AvatarAsset, OwnershipVerifier};
pub use schema::{strategy, LookupKey, RegistrySchema};

pub use suins_transport::{
    DescriptorFetchError, DescriptorFetcher, FieldName, GraphQLClient, HttpDescriptorFetcher,
    JsonRpcClient, KeyEncoding, ObjectOwner, ObjectProjection, ObjectReader, ObjectResponse,
    ObjectResponseError, SuiObject,
};
pub use suins_types::{Avatar, ContractDescriptor, NameRecord, Network, SchemaVersion};
