//! Shared test utilities for the thruster PWM crates.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - Duty-cycle and ordering assertion macros
//! - [`fixtures`] - Calibration tables, scenario cases and temp table files
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! thruster-pwm-test-helpers = { workspace = true }
//! ```
//!
//! ```rust
//! use thruster_pwm_test_helpers::prelude::*;
//!
//! let fixture = must(TableFileFixture::thruster());
//! assert!(fixture.path().exists());
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod assertions;
pub mod fixtures;
pub mod must;
pub mod prelude;

pub use must::*;
