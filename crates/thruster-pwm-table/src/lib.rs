//! Command-to-PWM lookup tables for thruster control.
//!
//! This crate turns a normalized effort command into a PWM duty-cycle pulse
//! width using a piecewise-linear table loaded from a two-column text file.
//!
//! # Overview
//!
//! - [`loader`]: parses `<command>,<duty_cycle_width>` rows into a [`PwmTable`]
//! - [`PwmTable`]: validated, sorted calibration points with saturation and
//!   linear interpolation
//! - [`compute_duty_cycle`]: per-command lookup with the no-actuation override
//!   for exactly-zero input
//! - [`DutyCycleMapper`]: table, no-actuation width and optional [`DeadZone`]
//!   bundled for the control loop
//!
//! # RT Safety Guarantees
//!
//! ## RT-Safe: `DutyCycleMapper::duty_cycle()`, `compute_duty_cycle()`
//! - No heap allocations
//! - No syscalls or I/O
//! - Bounded binary search over the calibration points
//!
//! ## NOT RT-Safe: `loader::load()`, `PwmTable::new()`
//! Loading reads the file and allocates; do it once at configure time.
//!
//! # Example
//!
//! ```
//! use thruster_pwm_table::{DutyCycleMapper, loader};
//!
//! let table = loader::parse_str("-1.0,1100\n0.0,1500\n1.0,1900\n")?;
//! let mapper = DutyCycleMapper::new(table, 1500);
//!
//! assert_eq!(mapper.duty_cycle(0.0), 1500);
//! assert_eq!(mapper.duty_cycle(0.25), 1600);
//! assert_eq!(mapper.duty_cycle(-5.0), 1100);
//! # Ok::<(), thruster_pwm_table::TableError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod duty_cycle;
pub mod error;
pub mod loader;
pub mod prelude;
pub mod table;

pub use duty_cycle::{DeadZone, DutyCycleMapper, compute_duty_cycle};
pub use error::{TableError, TableResult};
pub use table::{PwmPoint, PwmTable};
