//! Registries populated in each schema layout.
//!
//! Every fixture registers `alice.sui` owned by [`ALICE`], pointing at
//! [`ALICE`], with avatar [`AVATAR`] (owned by [`ALICE`]) and a content hash,
//! plus a reverse entry `ALICE -> alice.sui`.

use std::sync::Arc;

use serde_json::{json, Value};
use suins_client::{
    ClientConfig, ContractDescriptor, FieldKey, KeyEncoding, SchemaVersion, SuinsClient,
};
use suins_types::reverse_lookup_key;

use super::mocks::{MockChain, StaticDescriptorFetcher};

pub const PACKAGE: &str = "0x00000000000000000000000000000000000000000000000000000000000000aa";
pub const REGISTRY: &str = "0x00000000000000000000000000000000000000000000000000000000000000bb";
pub const REVERSE_REGISTRY: &str =
    "0x00000000000000000000000000000000000000000000000000000000000000cc";
pub const RESOLVER: &str = "0x00000000000000000000000000000000000000000000000000000000000000dd";
pub const TABLE: &str = "0x00000000000000000000000000000000000000000000000000000000000000ee";
pub const RECORD_ID: &str = "0x0000000000000000000000000000000000000000000000000000000000000f01";
pub const REVERSE_RECORD_ID: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000f02";
pub const NFT: &str = "0x0000000000000000000000000000000000000000000000000000000000000f03";
pub const AVATAR: &str = "0x0000000000000000000000000000000000000000000000000000000000000f04";

pub const ALICE: &str = "0x00000000000000000000000000000000000000000000000000000000000a11ce";
pub const BOB: &str = "0x0000000000000000000000000000000000000000000000000000000000000b0b";

pub const IMAGE_URL: &str = "https://images.example/alice.png";
pub const CONTENT_HASH: &str = "ipfs://QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

const STRING_TYPE: &str = "0x1::string::String";

pub fn descriptor_for(schema: SchemaVersion) -> ContractDescriptor {
    ContractDescriptor::new(PACKAGE, REGISTRY)
        .with_reverse_registry(REVERSE_REGISTRY)
        .with_schema(schema)
}

/// Client over `chain` with the descriptor supplied up front.
pub fn client_for(chain: Arc<MockChain>, schema: SchemaVersion) -> SuinsClient {
    let config = ClientConfig::default().with_descriptor(descriptor_for(schema));
    SuinsClient::with_descriptor_fetcher(
        chain,
        Arc::new(StaticDescriptorFetcher::new("{}")),
        config,
    )
}

fn owned_assets(chain: &MockChain) {
    chain.insert_object(NFT, Some(ALICE), None);
    chain.insert_object(AVATAR, Some(ALICE), Some(IMAGE_URL));
}

fn vec_map(entries: &[(&str, &str)]) -> Value {
    let contents: Vec<Value> = entries
        .iter()
        .map(|(key, value)| {
            json!({
                "type": "0x2::vec_map::Entry<0x1::string::String, 0x1::string::String>",
                "fields": { "key": key, "value": value }
            })
        })
        .collect();
    json!({
        "type": "0x2::vec_map::VecMap<0x1::string::String, 0x1::string::String>",
        "fields": { "contents": contents }
    })
}

/// Composite-keyed registry with inline records and an address-keyed reverse registry.
pub fn domain_key_chain(encoding: KeyEncoding) -> Arc<MockChain> {
    let chain = MockChain::new(encoding);
    owned_assets(&chain);

    let domain_type = format!("{}::domain::Domain", PACKAGE);
    chain.insert_field(
        REGISTRY,
        &FieldKey::Composite(vec!["alice".into(), "sui".into()]),
        &domain_type,
        RECORD_ID,
        json!({
            "type": format!("{}::name_record::NameRecord", PACKAGE),
            "fields": {
                "nft_id": NFT,
                "expiration_timestamp_ms": "1767225600000",
                "target_address": "0xa11ce",
                "data": vec_map(&[("avatar", AVATAR), ("content_hash", CONTENT_HASH)]),
            }
        }),
    );
    chain.insert_field(
        REVERSE_REGISTRY,
        &FieldKey::Address(ALICE.to_string()),
        "address",
        REVERSE_RECORD_ID,
        json!("alice.sui"),
    );
    Arc::new(chain)
}

/// String-keyed registry with inline records and a `data` table.
pub fn inline_record_chain(encoding: KeyEncoding) -> Arc<MockChain> {
    let chain = MockChain::new(encoding);
    owned_assets(&chain);

    chain.insert_field(
        REGISTRY,
        &FieldKey::Str("alice.sui".into()),
        STRING_TYPE,
        RECORD_ID,
        json!({
            "type": format!("{}::registry::NameRecord", PACKAGE),
            "fields": {
                "owner": ALICE,
                "nft_id": NFT,
                "linked_addr": ALICE,
                "default_domain_name": "",
                "ttl": "0",
                "data": {
                    "type": "0x2::table::Table<0x1::string::String, 0x1::string::String>",
                    "fields": { "id": { "id": TABLE }, "size": "2" }
                }
            }
        }),
    );
    chain.insert_field(
        TABLE,
        &FieldKey::Str("avatar".into()),
        STRING_TYPE,
        "0x0000000000000000000000000000000000000000000000000000000000000f11",
        json!(AVATAR),
    );
    chain.insert_field(
        TABLE,
        &FieldKey::Str("content_hash".into()),
        STRING_TYPE,
        "0x0000000000000000000000000000000000000000000000000000000000000f12",
        json!(CONTENT_HASH),
    );
    chain.insert_field(
        REGISTRY,
        &FieldKey::Str(reverse_lookup_key(ALICE)),
        STRING_TYPE,
        REVERSE_RECORD_ID,
        json!({
            "type": format!("{}::registry::NameRecord", PACKAGE),
            "fields": {
                "owner": ALICE,
                "linked_addr": "",
                "default_domain_name": "alice.sui",
                "ttl": "0",
                "data": {
                    "type": "0x2::table::Table<0x1::string::String, 0x1::string::String>",
                    "fields": {
                        "id": { "id": "0x00000000000000000000000000000000000000000000000000000000000000ef" },
                        "size": "0"
                    }
                }
            }
        }),
    );
    Arc::new(chain)
}

/// String-keyed registry whose entries point at a resolver object.
pub fn resolver_hop_chain(encoding: KeyEncoding) -> Arc<MockChain> {
    let chain = MockChain::new(encoding);
    chain.insert_object(AVATAR, Some(ALICE), Some(IMAGE_URL));

    let entry = |owner: &str| {
        json!({
            "type": format!("{}::base_registry::RegistryEntry", PACKAGE),
            "fields": { "owner": owner, "resolver": RESOLVER, "ttl": "3600" }
        })
    };
    chain.insert_field(
        REGISTRY,
        &FieldKey::Str("alice.sui".into()),
        STRING_TYPE,
        RECORD_ID,
        entry(ALICE),
    );
    chain.insert_field(
        RESOLVER,
        &FieldKey::Str("alice.sui".into()),
        STRING_TYPE,
        "0x0000000000000000000000000000000000000000000000000000000000000f21",
        json!({
            "contents": [
                { "key": "addr", "value": "0xa11ce" },
                { "key": "avatar", "value": AVATAR },
                { "key": "contenthash", "value": CONTENT_HASH },
                { "key": "owner", "value": BOB }
            ]
        }),
    );

    let reverse_key = reverse_lookup_key(ALICE);
    chain.insert_field(
        REGISTRY,
        &FieldKey::Str(reverse_key.clone()),
        STRING_TYPE,
        REVERSE_RECORD_ID,
        entry(ALICE),
    );
    chain.insert_field(
        RESOLVER,
        &FieldKey::Str(reverse_key),
        STRING_TYPE,
        "0x0000000000000000000000000000000000000000000000000000000000000f22",
        json!({ "contents": [{ "key": "name", "value": "alice.sui" }] }),
    );
    Arc::new(chain)
}
