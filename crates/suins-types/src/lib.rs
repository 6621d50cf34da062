//! Shared types for the SuiNS resolver workspace.
//!
//! This crate holds the data model every other crate agrees on:
//!
//! - [`ContractDescriptor`], [`Network`], [`SchemaVersion`]: bootstrap inputs
//! - [`NameRecord`], [`Avatar`]: resolution output
//! - [`address`]: canonical address formatting and reverse-key derivation
//! - [`env_utils`]: environment overrides used by configuration

pub mod address;
pub mod descriptor;
pub mod env_utils;
pub mod record;

pub use address::{
    addresses_equal, is_reverse_key, normalize_address, normalize_address_checked, parse_address,
    reverse_lookup_key, REVERSE_ZONE_SUFFIX,
};
pub use descriptor::{ContractDescriptor, Network, SchemaVersion};
pub use env_utils::{env_string, env_var, env_var_or};
pub use record::{Avatar, NameRecord, AVATAR_NOT_OWNED};
