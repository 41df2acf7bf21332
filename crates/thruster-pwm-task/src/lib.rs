//! Thruster effort to PWM translation task.
//!
//! One stage of a periodic control loop: each cycle it reads a batch of joint
//! commands, checks that every element carries the configured mode, maps each
//! effort to a duty-cycle width through a [`thruster_pwm_table::PwmTable`] and
//! writes one [`PwmCommand`] downstream.
//!
//! # Overview
//!
//! - [`TaskConfig`]: YAML/serde configuration with a builder
//! - [`Translator`]: mode validation and per-element mapping for one sample
//! - [`ThrusterTask`]: lifecycle state machine driving the translator
//! - [`CommandSource`] / [`PwmSink`]: ports to the upstream and downstream
//!   collaborators, implemented for `crossbeam` channels and in-memory queues
//!
//! # Example
//!
//! ```
//! use thruster_pwm_table::{DutyCycleMapper, loader};
//! use thruster_pwm_task::{JointMode, Joints, Translator};
//!
//! let table = loader::parse_str("-1.0,1100\n1.0,1900\n")?;
//! let translator = Translator::new(DutyCycleMapper::new(table, 1500), JointMode::Effort);
//!
//! let command = translator.translate(&Joints::efforts([0.0, 0.5, -2.0]))?;
//! assert_eq!(command.duty_cycles, vec![1500, 1700, 1100]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod joints;
pub mod ports;
pub mod prelude;
pub mod pwm;
pub mod state;
pub mod task;
pub mod translate;

pub use config::{InvalidModePolicy, TaskConfig, TaskConfigBuilder};
pub use error::{TaskError, TaskResult};
pub use joints::{JointCommand, JointMode, Joints};
pub use ports::{CommandSource, PwmSink, ReadStatus, SampleSlot};
pub use pwm::PwmCommand;
pub use state::TaskState;
pub use task::{CycleOutcome, TaskStats, ThrusterTask};
pub use translate::Translator;
