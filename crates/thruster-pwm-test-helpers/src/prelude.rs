//! Convenience re-exports for test code.
//!
//! ```rust
//! use thruster_pwm_test_helpers::prelude::*;
//! ```

pub use crate::fixtures::{
    DUPLICATE_COMMAND_TABLE_CSV, INVALID_TABLE_SOURCES, InterpolationCase, NO_ACTUATION_PWM,
    SINGLE_ROW_TABLE_CSV, THRUSTER_TABLE_CSV, TWO_POINT_TABLE_CSV, TableFileFixture,
    dead_zone_cases, interpolation_cases, saturation_cases,
};
pub use crate::must::{must, must_err, must_parse, must_some, must_with};
pub use crate::{assert_duty_between, assert_monotonic, assert_non_decreasing};

/// Result type for tests that propagate errors with `?`.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;
