//! Joint command samples received from the upstream controller.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Control mode tag carried by each joint command element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointMode {
    /// Position setpoint.
    Position,
    /// Speed setpoint.
    Speed,
    /// Normalized effort (thrust) command.
    #[default]
    Effort,
    /// Raw actuator command.
    Raw,
    /// Acceleration setpoint.
    Acceleration,
}

impl JointMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Position,
        Self::Speed,
        Self::Effort,
        Self::Raw,
        Self::Acceleration,
    ];

    /// Lowercase name, as used in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Speed => "speed",
            Self::Effort => "effort",
            Self::Raw => "raw",
            Self::Acceleration => "acceleration",
        }
    }
}

impl fmt::Display for JointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One command element: a mode tag and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointCommand {
    /// Which field of the command is meaningful.
    pub mode: JointMode,
    /// Command value for `mode`.
    pub value: f32,
}

impl JointCommand {
    /// Create a command element.
    pub const fn new(mode: JointMode, value: f32) -> Self {
        Self { mode, value }
    }

    /// Effort command.
    pub const fn effort(value: f32) -> Self {
        Self::new(JointMode::Effort, value)
    }

    /// Raw command.
    pub const fn raw(value: f32) -> Self {
        Self::new(JointMode::Raw, value)
    }
}

/// Ordered batch of joint commands for one control cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joints {
    /// Time the sample was produced.
    pub time: DateTime<Utc>,
    /// Joint names, parallel to `elements` when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    /// Command elements, one per thruster.
    pub elements: Vec<JointCommand>,
}

impl Joints {
    /// Create an unnamed sample stamped with the current time.
    pub fn new(elements: Vec<JointCommand>) -> Self {
        Self {
            time: Utc::now(),
            names: Vec::new(),
            elements,
        }
    }

    /// Create a sample of effort commands.
    pub fn efforts<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        Self::new(values.into_iter().map(JointCommand::effort).collect())
    }

    /// Set the joint names.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the sample time.
    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// Number of command elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check whether the sample has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Look up an element by joint name.
    pub fn get(&self, name: &str) -> Option<&JointCommand> {
        let index = self.names.iter().position(|n| n == name)?;
        self.elements.get(index)
    }
}
