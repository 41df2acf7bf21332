//! Effort to duty-cycle mapping with the no-actuation override.
//!
//! [`compute_duty_cycle`] is the bare per-command lookup. [`DutyCycleMapper`]
//! bundles a table with its no-actuation width and an optional [`DeadZone`]
//! so the translation loop only carries one value around.
//!
//! # RT Safety
//!
//! Both are RT-safe once the table is built: no allocation, no I/O and a
//! bounded binary search over the calibration points.

use serde::{Deserialize, Serialize};

use crate::error::{TableError, TableResult};
use crate::table::PwmTable;

/// Map one effort command to a duty-cycle width.
///
/// Exactly-zero and NaN commands return `no_actuation`; every other command
/// goes through [`PwmTable::interpolate`].
///
/// # Example
///
/// ```
/// use thruster_pwm_table::{PwmTable, compute_duty_cycle};
///
/// let table: PwmTable = "-1.0,1100\n1.0,1900".parse()?;
/// assert_eq!(compute_duty_cycle(&table, 1500, 0.0), 1500);
/// assert_eq!(compute_duty_cycle(&table, 1500, 0.5), 1700);
/// assert_eq!(compute_duty_cycle(&table, 1500, -3.0), 1100);
/// # Ok::<(), thruster_pwm_table::TableError>(())
/// ```
#[inline]
pub fn compute_duty_cycle(table: &PwmTable, no_actuation: u32, command: f64) -> u32 {
    if command == 0.0 {
        return no_actuation;
    }
    table.interpolate(command).unwrap_or(no_actuation)
}

/// Closed effort interval mapped to the no-actuation width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDeadZone", into = "RawDeadZone")]
pub struct DeadZone {
    min: f64,
    max: f64,
}

impl DeadZone {
    /// Create a dead zone covering `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidDeadZone`] if a bound is not finite or
    /// `min > max`.
    pub fn new(min: f64, max: f64) -> TableResult<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(TableError::InvalidDeadZone { min, max });
        }
        Ok(Self { min, max })
    }

    /// Symmetric dead zone `[-half_width, half_width]`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidDeadZone`] if `half_width` is negative or
    /// not finite.
    pub fn symmetric(half_width: f64) -> TableResult<Self> {
        Self::new(-half_width, half_width)
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Check whether `command` falls inside the zone, bounds included.
    #[inline]
    pub fn contains(&self, command: f64) -> bool {
        (self.min..=self.max).contains(&command)
    }

    /// Check whether a single-precision effort falls inside the zone, bounds
    /// included.
    ///
    /// The bounds are narrowed to `f32` first, so a zone configured as
    /// `[-0.3, 0.3]` contains `0.3f32` even though its widened value is
    /// slightly above `0.3`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn contains_effort(&self, effort: f32) -> bool {
        (self.min as f32..=self.max as f32).contains(&effort)
    }
}

#[derive(Serialize, Deserialize)]
struct RawDeadZone {
    min: f64,
    max: f64,
}

impl TryFrom<RawDeadZone> for DeadZone {
    type Error = TableError;

    fn try_from(raw: RawDeadZone) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl From<DeadZone> for RawDeadZone {
    fn from(zone: DeadZone) -> Self {
        Self {
            min: zone.min,
            max: zone.max,
        }
    }
}

/// Table plus no-actuation policy, ready for per-cycle use.
///
/// # Example
///
/// ```
/// use thruster_pwm_table::{DeadZone, DutyCycleMapper, PwmTable};
///
/// let table: PwmTable = "-1.0,1100\n1.0,1900".parse()?;
/// let mapper = DutyCycleMapper::new(table, 1500).with_dead_zone(DeadZone::symmetric(0.1)?);
///
/// assert_eq!(mapper.duty_cycle(0.05), 1500);
/// assert_eq!(mapper.duty_cycle(0.5), 1700);
/// # Ok::<(), thruster_pwm_table::TableError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DutyCycleMapper {
    table: PwmTable,
    no_actuation: u32,
    dead_zone: Option<DeadZone>,
}

impl DutyCycleMapper {
    /// Create a mapper without a dead zone.
    pub fn new(table: PwmTable, no_actuation: u32) -> Self {
        Self {
            table,
            no_actuation,
            dead_zone: None,
        }
    }

    /// Set the dead zone.
    #[must_use]
    pub fn with_dead_zone(mut self, dead_zone: DeadZone) -> Self {
        self.dead_zone = Some(dead_zone);
        self
    }

    /// Set or clear the dead zone.
    #[must_use]
    pub fn with_optional_dead_zone(mut self, dead_zone: Option<DeadZone>) -> Self {
        self.dead_zone = dead_zone;
        self
    }

    /// The underlying table.
    pub fn table(&self) -> &PwmTable {
        &self.table
    }

    /// Width emitted for zero, NaN and dead-zone commands.
    pub fn no_actuation(&self) -> u32 {
        self.no_actuation
    }

    /// Configured dead zone, if any.
    pub fn dead_zone(&self) -> Option<DeadZone> {
        self.dead_zone
    }

    /// Map one effort command to a duty-cycle width.
    #[inline]
    pub fn duty_cycle(&self, command: f64) -> u32 {
        if self.dead_zone.is_some_and(|zone| zone.contains(command)) {
            return self.no_actuation;
        }
        compute_duty_cycle(&self.table, self.no_actuation, command)
    }

    /// Map one single-precision effort to a duty-cycle width.
    ///
    /// The dead zone is tested in `f32`; interpolation runs on the widened
    /// value.
    #[inline]
    pub fn effort_duty_cycle(&self, effort: f32) -> u32 {
        if self.dead_zone.is_some_and(|zone| zone.contains_effort(effort)) {
            return self.no_actuation;
        }
        compute_duty_cycle(&self.table, self.no_actuation, f64::from(effort))
    }

    /// Map a batch of single-precision efforts into `out`, keeping input order.
    ///
    /// `out` is cleared first; its capacity is reused.
    pub fn effort_duty_cycles_into<I>(&self, efforts: I, out: &mut Vec<u32>)
    where
        I: IntoIterator<Item = f32>,
    {
        out.clear();
        out.extend(efforts.into_iter().map(|effort| self.effort_duty_cycle(effort)));
    }

    /// Map a batch of commands into `out`, keeping input order.
    ///
    /// `out` is cleared first; its capacity is reused.
    pub fn duty_cycles_into<I>(&self, commands: I, out: &mut Vec<u32>)
    where
        I: IntoIterator<Item = f64>,
    {
        out.clear();
        out.extend(commands.into_iter().map(|command| self.duty_cycle(command)));
    }
}
