//! Assertion helpers with readable failure messages.

use serde::Serialize;
use serde_json::Value;

/// Assert that a result is Ok and return the inner value.
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:?}", context, e),
    }
}

/// Assert that a result is Err and return the error.
pub fn assert_err<T: std::fmt::Debug, E>(result: Result<T, E>, context: &str) -> E {
    match result {
        Ok(v) => panic!("{} should have failed but got: {:?}", context, v),
        Err(e) => e,
    }
}

/// Assert the JSON form of `value`.
pub fn assert_serializes_to<T: Serialize>(value: &T, expected: Value) {
    let actual = serde_json::to_value(value).expect("value must serialize");
    assert_eq!(actual, expected, "serialized form mismatch");
}
