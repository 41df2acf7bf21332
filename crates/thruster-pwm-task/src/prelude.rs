//! Convenience re-exports.
//!
//! ```
//! use thruster_pwm_task::prelude::*;
//! ```

pub use crate::config::{InvalidModePolicy, TaskConfig};
pub use crate::error::{TaskError, TaskResult};
pub use crate::joints::{JointCommand, JointMode, Joints};
pub use crate::ports::{CommandSource, PwmSink, ReadStatus, SampleSlot};
pub use crate::pwm::PwmCommand;
pub use crate::state::TaskState;
pub use crate::task::{CycleOutcome, TaskStats, ThrusterTask};
pub use crate::translate::Translator;
pub use thruster_pwm_table::{DeadZone, DutyCycleMapper, PwmTable, TableError};
