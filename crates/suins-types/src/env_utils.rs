//! Environment variable parsing utilities.
//!
//! Type-safe helpers for reading configuration overrides from the environment,
//! replacing the repeated pattern:
//!
//! ```ignore
//! std::env::var("VAR_NAME")
//!     .ok()
//!     .and_then(|v| v.parse::<u64>().ok())
//!     .unwrap_or(default_value)
//! ```
//!
//! # Example
//!
//! ```
//! use suins_types::env_utils::{env_var, env_var_or};
//!
//! let timeout: u64 = env_var_or("SUI_HTTP_TIMEOUT_SECS", 30);
//! let custom: Option<u64> = env_var("CUSTOM_VALUE");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set, is blank, or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    env_string(key).and_then(|v| v.parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Read a non-blank string environment variable.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("SUINS_TEST_U64", "42");
        let val: Option<u64> = env_var("SUINS_TEST_U64");
        assert_eq!(val, Some(42));

        let missing: Option<u64> = env_var("SUINS_NONEXISTENT_VAR_12345");
        assert_eq!(missing, None);

        std::env::remove_var("SUINS_TEST_U64");
    }

    #[test]
    fn test_env_var_or() {
        std::env::set_var("SUINS_TEST_WITH_DEFAULT", "100");
        let val: u64 = env_var_or("SUINS_TEST_WITH_DEFAULT", 50);
        assert_eq!(val, 100);

        let default_val: u64 = env_var_or("SUINS_NONEXISTENT_VAR_12346", 50);
        assert_eq!(default_val, 50);

        std::env::remove_var("SUINS_TEST_WITH_DEFAULT");
    }

    #[test]
    fn test_env_string_blank_is_none() {
        std::env::set_var("SUINS_TEST_BLANK", "   ");
        assert_eq!(env_string("SUINS_TEST_BLANK"), None);
        std::env::set_var("SUINS_TEST_BLANK", " devnet ");
        assert_eq!(env_string("SUINS_TEST_BLANK").as_deref(), Some("devnet"));
        std::env::remove_var("SUINS_TEST_BLANK");
    }
}
