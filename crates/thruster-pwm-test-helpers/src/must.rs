//! Panicking unwrap helpers for test code.
//!
//! Library crates deny `clippy::unwrap_used`; tests use these instead. Every
//! helper is `#[track_caller]`, so a failure points at the test line and the
//! panic message carries the unexpected value.

use std::fmt::Debug;
use std::str::FromStr;

/// Return the `Ok` value, panicking with the error otherwise.
///
/// ```rust
/// use thruster_pwm_test_helpers::must;
///
/// let width: Result<u32, String> = Ok(1500);
/// assert_eq!(must(width), 1500);
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must: unexpected Err: {e:?}"),
    }
}

/// Return the `Err` value, panicking with the success value otherwise.
///
/// ```rust
/// use thruster_pwm_test_helpers::must_err;
///
/// let parsed: Result<u32, _> = "fast".parse::<u32>();
/// let err = must_err(parsed);
/// assert!(err.to_string().contains("invalid digit"));
/// ```
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("must_err: unexpected Ok: {v:?}"),
        Err(e) => e,
    }
}

/// Return the `Some` value, panicking with `msg` otherwise.
#[track_caller]
pub fn must_some<T>(option: Option<T>, msg: &str) -> T {
    match option {
        Some(v) => v,
        None => panic!("must_some: {msg}"),
    }
}

/// Parse `s`, panicking with the parse error on failure.
///
/// ```rust
/// use thruster_pwm_test_helpers::must_parse;
///
/// let command: f64 = must_parse("-0.25");
/// assert_eq!(command, -0.25);
/// ```
#[track_caller]
pub fn must_parse<T: FromStr>(s: &str) -> T
where
    T::Err: Debug,
{
    match s.trim().parse() {
        Ok(v) => v,
        Err(e) => panic!("must_parse: failed to parse {s:?}: {e:?}"),
    }
}

/// Like [`must`], with a context message in the panic.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("must_with: {context}: {e:?}"),
    }
}
