//! Validated command-to-PWM lookup table.

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};

/// One calibration point of the table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PwmPoint {
    /// Effort command at this point.
    pub command: f64,
    /// PWM pulse width produced for `command`.
    pub duty_cycle: u32,
}

impl PwmPoint {
    /// Create a calibration point.
    pub const fn new(command: f64, duty_cycle: u32) -> Self {
        Self {
            command,
            duty_cycle,
        }
    }
}

/// Ordered command-to-PWM lookup table.
///
/// The table holds two parallel sequences, `cmd` and `duty`, with at least one
/// point. Commands are finite and non-decreasing; both properties are checked
/// on construction and on deserialization, so every `PwmTable` value can be
/// interpolated without further checks.
///
/// # Example
///
/// ```
/// use thruster_pwm_table::PwmTable;
///
/// let table = PwmTable::new(vec![0.0, 1.0], vec![1500, 1900])?;
/// assert_eq!(table.interpolate(0.5), Some(1700));
/// assert_eq!(table.interpolate(4.0), Some(1900));
/// # Ok::<(), thruster_pwm_table::TableError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable", into = "RawTable")]
pub struct PwmTable {
    cmd: Vec<f64>,
    duty: Vec<u32>,
}

impl PwmTable {
    /// Build a table from parallel command and duty-cycle sequences.
    ///
    /// # Errors
    ///
    /// - [`TableError::LengthMismatch`] if the sequences differ in length
    /// - [`TableError::EmptyTable`] if they are empty
    /// - [`TableError::NonFiniteCommand`] if a command is NaN or infinite
    /// - [`TableError::Unsorted`] if a command is lower than its predecessor
    pub fn new(cmd: Vec<f64>, duty: Vec<u32>) -> TableResult<Self> {
        validate(&cmd, &duty)?;
        Ok(Self { cmd, duty })
    }

    /// Build a table from calibration points, in order.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PwmTable::new`].
    pub fn from_points<I>(points: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = PwmPoint>,
    {
        let (cmd, duty) = points
            .into_iter()
            .map(|point| (point.command, point.duty_cycle))
            .unzip();
        Self::new(cmd, duty)
    }

    /// Number of calibration points (always at least one).
    pub fn len(&self) -> usize {
        self.cmd.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cmd.is_empty()
    }

    /// Command values in table order.
    pub fn commands(&self) -> &[f64] {
        &self.cmd
    }

    /// Duty-cycle widths in table order.
    pub fn duty_cycles(&self) -> &[u32] {
        &self.duty
    }

    /// Calibration point at `index`.
    pub fn point(&self, index: usize) -> Option<PwmPoint> {
        let command = *self.cmd.get(index)?;
        let duty_cycle = *self.duty.get(index)?;
        Some(PwmPoint::new(command, duty_cycle))
    }

    /// Iterate over the calibration points in order.
    pub fn points(&self) -> impl Iterator<Item = PwmPoint> + '_ {
        self.cmd
            .iter()
            .zip(&self.duty)
            .map(|(&command, &duty_cycle)| PwmPoint::new(command, duty_cycle))
    }

    /// Lowest calibration point.
    pub fn first(&self) -> PwmPoint {
        self.point(0).unwrap_or_default()
    }

    /// Highest calibration point.
    pub fn last(&self) -> PwmPoint {
        self.point(self.len().saturating_sub(1)).unwrap_or_default()
    }

    /// Command domain `(cmd[0], cmd[n-1])` covered by the table.
    pub fn command_range(&self) -> (f64, f64) {
        (self.first().command, self.last().command)
    }

    /// Check whether every command is strictly greater than its predecessor.
    ///
    /// Tables with repeated commands are valid, but only the first point of a
    /// run of equal commands is ever reached by interpolation.
    pub fn is_strictly_increasing(&self) -> bool {
        self.cmd.windows(2).all(|pair| match pair {
            [previous, current] => current > previous,
            _ => true,
        })
    }

    /// Find the bracket `(i-1, i)` around `command`.
    ///
    /// `i` is the smallest index in `1..n` with `command <= cmd[i]`. Returns
    /// `None` when `command` is NaN or lies at or beyond either end of the
    /// table, where saturation applies instead.
    pub fn bracket(&self, command: f64) -> Option<(PwmPoint, PwmPoint)> {
        let (low, high) = self.command_range();
        if command.is_nan() || command <= low || command >= high {
            return None;
        }

        // Commands are sorted, so `c < command` is true for a prefix only.
        let upper = self.cmd.partition_point(|&c| c < command);
        let lower = upper.checked_sub(1)?;
        Some((self.point(lower)?, self.point(upper)?))
    }

    /// Map `command` through the table, without the no-actuation override.
    ///
    /// Commands at or below the first point saturate to `duty[0]`, commands
    /// at or above the last point saturate to `duty[n-1]`, anything in
    /// between is linearly interpolated and rounded half away from zero.
    /// Returns `None` for NaN.
    pub fn interpolate(&self, command: f64) -> Option<u32> {
        if command.is_nan() {
            return None;
        }

        let first = self.first();
        if command <= first.command {
            return Some(first.duty_cycle);
        }

        let last = self.last();
        if command >= last.command {
            return Some(last.duty_cycle);
        }

        let (lower, upper) = self.bracket(command)?;
        let (x0, x1) = (lower.command, upper.command);
        let (y0, y1) = (f64::from(lower.duty_cycle), f64::from(upper.duty_cycle));

        // x1 > x0 here: command > x0 by minimality of the bracket and x1 >= command.
        let scaled = (y1 - y0) * (command - x0) / (x1 - x0);
        let out = if scaled.is_finite() {
            y0 + scaled
        } else {
            y0 + (y1 - y0) * wide_fraction(command, x0, x1)
        };
        Some(round_duty_cycle(out))
    }
}

/// Position of `command` in `[x0, x1]` for brackets whose span overflows.
///
/// Halving every operand keeps the differences finite.
#[inline]
fn wide_fraction(command: f64, x0: f64, x1: f64) -> f64 {
    let fraction = (command / 2.0 - x0 / 2.0) / (x1 / 2.0 - x0 / 2.0);
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Round an interpolated width half away from zero.
///
/// Interpolated values always lie between two `u32` widths; the float to int
/// cast saturates for anything outside that range.
#[inline]
fn round_duty_cycle(value: f64) -> u32 {
    value.round() as u32
}

fn validate(cmd: &[f64], duty: &[u32]) -> TableResult<()> {
    if cmd.len() != duty.len() {
        return Err(TableError::LengthMismatch {
            commands: cmd.len(),
            duty_cycles: duty.len(),
        });
    }

    if cmd.is_empty() {
        return Err(TableError::EmptyTable);
    }

    if let Some((index, &value)) = cmd.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(TableError::NonFiniteCommand { index, value });
    }

    for (index, pair) in cmd.windows(2).enumerate() {
        if let [previous, current] = *pair
            && current < previous
        {
            return Err(TableError::Unsorted {
                line: index + 2,
                previous,
                current,
            });
        }
    }

    Ok(())
}

/// Serialized form of [`PwmTable`].
#[derive(Serialize, Deserialize)]
struct RawTable {
    cmd: Vec<f64>,
    duty: Vec<u32>,
}

impl TryFrom<RawTable> for PwmTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::new(raw.cmd, raw.duty)
    }
}

impl From<PwmTable> for RawTable {
    fn from(table: PwmTable) -> Self {
        Self {
            cmd: table.cmd,
            duty: table.duty,
        }
    }
}
