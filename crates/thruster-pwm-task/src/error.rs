//! Error types for the translation task.

use std::path::PathBuf;

use thiserror::Error;
use thruster_pwm_table::TableError;

use crate::joints::JointMode;
use crate::state::TaskState;

/// Error type for configuration, lifecycle and per-cycle failures.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Loading or validating the command-to-PWM table failed.
    #[error("PWM table error: {0}")]
    Table(#[from] TableError),

    /// Configuration values are invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration text is not valid YAML for [`TaskConfig`](crate::TaskConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Configuration could not be written out as YAML.
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[source] serde_yaml::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    ConfigIo {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A command element carries a mode other than the configured one.
    #[error("invalid command mode for element {index}: expected {expected}, got {actual}")]
    InvalidCommandMode {
        /// Position of the first offending element.
        index: usize,
        /// Configured input mode.
        expected: JointMode,
        /// Mode found on the element.
        actual: JointMode,
    },

    /// A lifecycle operation was called from a state that does not allow it.
    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        /// Operation that was attempted.
        operation: &'static str,
        /// State the task was in.
        state: TaskState,
    },

    /// The downstream consumer of PWM commands has gone away.
    #[error("PWM command sink is disconnected")]
    SinkDisconnected,
}

impl TaskError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid transition error.
    #[must_use]
    pub fn invalid_transition(operation: &'static str, state: TaskState) -> Self {
        Self::InvalidTransition { operation, state }
    }

    /// Check whether the error only affects the current cycle.
    ///
    /// Cycle-scoped errors leave the task configured; the next cycle runs
    /// normally unless the invalid-mode policy escalates.
    #[must_use]
    pub fn is_cycle_scoped(&self) -> bool {
        matches!(self, Self::InvalidCommandMode { .. } | Self::SinkDisconnected)
    }
}

/// A specialized `Result` type for task operations.
pub type TaskResult<T> = std::result::Result<T, TaskError>;
