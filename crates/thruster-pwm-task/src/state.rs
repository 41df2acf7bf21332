//! Lifecycle states of the translation task.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`ThrusterTask`](crate::ThrusterTask).
///
/// ```text
/// Unconfigured --configure--> Configured --start--> Running
///      ^                          |                  |   ^
///      |                          |          (escalate)  | recover
///      |                          |                  v   |
///   Cleaned <------cleanup------- + ------------- Error -+
///      ^                                             |
///      +--------cleanup-------- Stopped <----stop----+ (also from Running)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// No configuration loaded.
    #[default]
    Unconfigured,
    /// Table loaded, not cycling yet.
    Configured,
    /// Translating one sample per cycle.
    Running,
    /// Stopped after an escalated cycle failure.
    Error,
    /// Stopped on request; can start again.
    Stopped,
    /// Resources released; can be configured again.
    Cleaned,
}

impl TaskState {
    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::Running => "running",
            Self::Error => "error",
            Self::Stopped => "stopped",
            Self::Cleaned => "cleaned",
        }
    }

    /// Check whether a table and translator are held in this state.
    pub const fn holds_table(self) -> bool {
        matches!(
            self,
            Self::Configured | Self::Running | Self::Error | Self::Stopped
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
