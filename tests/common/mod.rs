#![allow(unused_imports, dead_code)]
//! Shared test utilities for integration tests.
//!
//! # Modules
//!
//! - `mocks`: in-memory chain and descriptor fetcher
//! - `fixtures`: registries populated in each schema layout
//! - `assertions`: assertion helpers with readable failure messages

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use assertions::{assert_err, assert_ok, assert_serializes_to};
pub use fixtures::{
    client_for, descriptor_for, domain_key_chain, inline_record_chain, resolver_hop_chain, ALICE,
    AVATAR, BOB, CONTENT_HASH, IMAGE_URL, NFT, PACKAGE, RECORD_ID, REGISTRY, RESOLVER,
    REVERSE_RECORD_ID, REVERSE_REGISTRY, TABLE,
};
pub use mocks::{MockChain, StaticDescriptorFetcher};
