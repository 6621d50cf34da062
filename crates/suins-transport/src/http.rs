//! Shared HTTP agent construction.

use std::time::Duration;

use suins_types::env_var_or;

/// Default request timeout in seconds (can be overridden by env).
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default connect timeout in seconds (can be overridden by env).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub(crate) fn default_timeouts() -> (Duration, Duration) {
    let timeout_secs = env_var_or("SUI_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
    let connect_secs = env_var_or("SUI_HTTP_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS);
    (
        Duration::from_secs(timeout_secs),
        Duration::from_secs(connect_secs),
    )
}

pub(crate) fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .timeout_connect(connect_timeout)
        .build()
}
