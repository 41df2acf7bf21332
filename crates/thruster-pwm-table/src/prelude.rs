//! Convenience re-exports.
//!
//! ```
//! use thruster_pwm_table::prelude::*;
//! ```

pub use crate::duty_cycle::{DeadZone, DutyCycleMapper, compute_duty_cycle};
pub use crate::error::{TableError, TableResult};
pub use crate::loader::{from_reader, load, parse_str};
pub use crate::table::{PwmPoint, PwmTable};
