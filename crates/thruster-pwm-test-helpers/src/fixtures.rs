//! Table fixtures shared by the thruster PWM test suites.
//!
//! Tables are provided as CSV text so that this crate stays independent of the
//! crates under test; parse them with the loader of the crate being tested.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// No-actuation width used throughout the scenario fixtures.
pub const NO_ACTUATION_PWM: u32 = 42;

/// Eleven-point thruster calibration, sorted, asymmetric around zero.
pub const THRUSTER_TABLE_CSV: &str = "\
-10.0,1100
-6.0,1240
-3.0,1350
-1.0,1440
-0.2,1460
0.0,1500
0.2,1540
1.0,1560
3.0,1640
6.0,1750
14.0,1900
";

/// Two-point table, `0.5` maps to `1700`.
pub const TWO_POINT_TABLE_CSV: &str = "0.0,1500\n1.0,1900\n";

/// Single-row table.
pub const SINGLE_ROW_TABLE_CSV: &str = "0.5,1620\n";

/// Table with a repeated command at zero.
pub const DUPLICATE_COMMAND_TABLE_CSV: &str = "-1.0,1400\n0.0,1460\n0.0,1540\n1.0,1600\n";

/// Sources the loader must reject, paired with a short label.
pub const INVALID_TABLE_SOURCES: &[(&str, &str)] = &[
    ("empty", ""),
    ("blank_lines", "\n \n\t\n"),
    ("missing_separator", "0.0 1500\n"),
    ("bad_command", "zero,1500\n"),
    ("bad_duty_cycle", "0.0,fast\n"),
    ("negative_duty_cycle", "0.0,-1500\n"),
    ("non_finite_command", "inf,1500\n"),
    ("unsorted", "1.0,1900\n0.0,1500\n"),
];

/// One effort command and the width expected for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationCase {
    /// Effort command as received on the joint input.
    pub effort: f32,
    /// Expected duty-cycle width.
    pub expected: u32,
}

impl InterpolationCase {
    const fn new(effort: f32, expected: u32) -> Self {
        Self { effort, expected }
    }
}

/// Interior points of [`THRUSTER_TABLE_CSV`], interpolated and rounded.
pub fn interpolation_cases() -> Vec<InterpolationCase> {
    vec![
        InterpolationCase::new(2.21, 1608),
        InterpolationCase::new(6.21, 1754),
        InterpolationCase::new(0.69, 1552),
        InterpolationCase::new(-2.86, 1356),
        InterpolationCase::new(-6.52, 1222),
    ]
}

/// Out-of-domain commands of [`THRUSTER_TABLE_CSV`].
pub fn saturation_cases() -> Vec<InterpolationCase> {
    vec![
        InterpolationCase::new(-10.32, 1100),
        InterpolationCase::new(16.45, 1900),
        InterpolationCase::new(f32::NEG_INFINITY, 1100),
        InterpolationCase::new(f32::INFINITY, 1900),
    ]
}

/// Commands inside a `[-0.3, 0.3]` dead zone; all expect [`NO_ACTUATION_PWM`].
pub fn dead_zone_cases() -> Vec<InterpolationCase> {
    vec![
        InterpolationCase::new(-0.159, NO_ACTUATION_PWM),
        InterpolationCase::new(0.259, NO_ACTUATION_PWM),
        InterpolationCase::new(0.0, NO_ACTUATION_PWM),
        InterpolationCase::new(0.3, NO_ACTUATION_PWM),
        InterpolationCase::new(-0.3, NO_ACTUATION_PWM),
    ]
}

/// A table written to a temporary directory.
///
/// The directory, and the file with it, is removed when the fixture drops.
#[derive(Debug)]
pub struct TableFileFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl TableFileFixture {
    /// Write `contents` to `command_to_pwm.csv` in a fresh temp directory.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating the directory or writing the file.
    pub fn new(contents: &str) -> io::Result<Self> {
        Self::with_name("command_to_pwm.csv", contents)
    }

    /// Write `contents` to `file_name` in a fresh temp directory.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating the directory or writing the file.
    pub fn with_name(file_name: &str, contents: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(file_name);
        fs::write(&path, contents)?;
        Ok(Self { _dir: dir, path })
    }

    /// The thruster calibration table written to disk.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing the file.
    pub fn thruster() -> io::Result<Self> {
        Self::new(THRUSTER_TABLE_CSV)
    }

    /// Path of the written table.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path in the same temp directory that does not exist.
    pub fn missing_path(&self) -> PathBuf {
        self.path.with_file_name("missing.csv")
    }
}
