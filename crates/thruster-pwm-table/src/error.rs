//! Error types for table loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for command-to-PWM table operations.
///
/// Every variant is a configuration-time failure: a table that produced one
/// of these errors never reaches the interpolator.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table source could not be opened or read.
    #[error("failed to read PWM table {}: {source}", path.display())]
    Io {
        /// Path of the table source.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source contained no data rows.
    #[error("PWM table contains no data rows")]
    EmptyTable,

    /// A row could not be parsed as `<command>,<duty_cycle_width>`.
    #[error("malformed PWM table row {line} ({content:?}): {reason}")]
    MalformedRow {
        /// 1-based line number in the source.
        line: usize,
        /// The offending line, trimmed.
        content: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A command value is lower than the one on the previous row.
    #[error("PWM table is not sorted at row {line}: command {current} follows {previous}")]
    Unsorted {
        /// 1-based row number of the offending point.
        line: usize,
        /// Command of the previous row.
        previous: f64,
        /// Command of the offending row.
        current: f64,
    },

    /// Command and duty-cycle sequences have different lengths.
    #[error("PWM table has {commands} commands but {duty_cycles} duty cycles")]
    LengthMismatch {
        /// Number of command values.
        commands: usize,
        /// Number of duty-cycle widths.
        duty_cycles: usize,
    },

    /// A command value is NaN or infinite.
    #[error("PWM table command at index {index} is not finite: {value}")]
    NonFiniteCommand {
        /// 0-based index of the point.
        index: usize,
        /// The invalid value.
        value: f64,
    },

    /// Dead zone bounds are not finite or are inverted.
    #[error("invalid dead zone [{min}, {max}]")]
    InvalidDeadZone {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl TableError {
    /// Create an I/O error for `path`.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed row error.
    #[must_use]
    pub fn malformed_row(
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRow {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized `Result` type for table operations.
pub type TableResult<T> = std::result::Result<T, TableError>;
