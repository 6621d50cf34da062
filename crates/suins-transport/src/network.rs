use suins_types::{env_string, Network};

const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_GRAPHQL: &str = "https://graphql.devnet.sui.io/graphql";
const TESTNET_GRAPHQL: &str = "https://graphql.testnet.sui.io/graphql";

/// Bucket holding the published SuiNS contract descriptors.
pub const DEFAULT_DESCRIPTOR_BASE_URL: &str = "https://storage.googleapis.com/suins-sdk";

pub fn default_rpc_endpoint(network: Network) -> String {
    match network {
        Network::Testnet => TESTNET_RPC.to_string(),
        Network::Devnet => DEVNET_RPC.to_string(),
    }
}

pub fn default_graphql_endpoint(network: Network) -> String {
    match network {
        Network::Testnet => TESTNET_GRAPHQL.to_string(),
        Network::Devnet => DEVNET_GRAPHQL.to_string(),
    }
}

pub fn resolve_rpc_endpoint(network: Network) -> String {
    env_string("SUI_RPC_URL").unwrap_or_else(|| default_rpc_endpoint(network))
}

pub fn resolve_graphql_endpoint(network: Network) -> String {
    env_string("SUI_GRAPHQL_ENDPOINT").unwrap_or_else(|| default_graphql_endpoint(network))
}

/// URL of the descriptor document for `network` under `base`.
pub fn descriptor_url(base: &str, network: Network) -> String {
    format!("{}/{}", base.trim_end_matches('/'), network.descriptor_file())
}

pub fn resolve_descriptor_base_url() -> String {
    env_string("SUINS_DESCRIPTOR_BASE_URL")
        .unwrap_or_else(|| DEFAULT_DESCRIPTOR_BASE_URL.to_string())
}
