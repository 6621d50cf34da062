//! SuiNS Transport Layer
//!
//! Read-only access to Sui objects for name resolution.
//!
//! This crate provides:
//! - [`reader`]: the [`ObjectReader`] trait and the response types it speaks
//! - [`jsonrpc`]: JSON-RPC client (symbolic dynamic-field keys)
//! - [`graphql`]: GraphQL client (BCS dynamic-field keys)
//! - [`descriptor`]: one-shot HTTP fetch of contract descriptor documents
//! - [`network`]: default endpoints per network
//!
//! # Example
//!
//! ```ignore
//! use suins_transport::{JsonRpcClient, ObjectProjection, ObjectReader};
//!
//! let rpc = JsonRpcClient::testnet();
//! let response = rpc.fetch_object("0x...", ObjectProjection::new().with_owner()).await?;
//! ```

pub mod descriptor;
pub mod graphql;
mod http;
pub mod jsonrpc;
pub mod network;
pub mod reader;

// Re-export main types for convenience
pub use descriptor::{DescriptorFetchError, DescriptorFetcher, HttpDescriptorFetcher};
pub use graphql::GraphQLClient;
pub use jsonrpc::JsonRpcClient;
pub use reader::{
    FieldName, KeyEncoding, ObjectOwner, ObjectProjection, ObjectReader, ObjectResponse,
    ObjectResponseError, SuiObject,
};
