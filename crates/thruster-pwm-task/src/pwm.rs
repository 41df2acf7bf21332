//! PWM command emitted once per successful cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Duty-cycle widths for every thruster, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PwmCommand {
    /// Emission time.
    pub timestamp: DateTime<Utc>,
    /// One pulse width per input element.
    pub duty_cycles: Vec<u32>,
}

impl PwmCommand {
    /// Create a command.
    pub fn new(timestamp: DateTime<Utc>, duty_cycles: Vec<u32>) -> Self {
        Self {
            timestamp,
            duty_cycles,
        }
    }

    /// Number of thrusters addressed.
    pub fn len(&self) -> usize {
        self.duty_cycles.len()
    }

    /// Check whether the command addresses no thruster.
    pub fn is_empty(&self) -> bool {
        self.duty_cycles.is_empty()
    }
}
