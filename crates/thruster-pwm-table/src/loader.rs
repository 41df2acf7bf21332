//! Table loading from `<command>,<duty_cycle_width>` text sources.
//!
//! One row per line, no header. The line is split at the first comma; the
//! left side parses as `f64`, the right side as `u32`. Surrounding whitespace
//! (including a trailing `\r`) is ignored and blank lines are skipped. Rows
//! keep their file order, which must already be sorted by command.
//!
//! ```text
//! -1.0,1100
//! 0.0,1500
//! 1.0,1900
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{TableError, TableResult};
use crate::table::{PwmPoint, PwmTable};

/// Origin recorded in I/O errors raised by [`from_reader`].
const READER_ORIGIN: &str = "<reader>";

/// Load a table from a file.
///
/// # Errors
///
/// - [`TableError::Io`] if the file cannot be opened or read
/// - [`TableError::MalformedRow`] if a row does not parse
/// - [`TableError::Unsorted`] if commands decrease between rows
/// - [`TableError::EmptyTable`] if the file has no data rows
pub fn load(path: impl AsRef<Path>) -> TableResult<PwmTable> {
    let path = path.as_ref();
    debug!(path = ?path, "Reading PWM table");

    let file = File::open(path).map_err(|e| TableError::io(path, e))?;
    let table = collect_rows(BufReader::new(file).lines(), path)?;

    debug!(path = ?path, rows = table.len(), "Loaded PWM table");
    Ok(table)
}

/// Parse a table from any buffered reader.
///
/// # Errors
///
/// Same conditions as [`load`]; I/O errors carry a `<reader>` path.
pub fn from_reader<R: BufRead>(reader: R) -> TableResult<PwmTable> {
    collect_rows(reader.lines(), Path::new(READER_ORIGIN))
}

/// Parse a table held in memory.
///
/// # Errors
///
/// Same conditions as [`load`], minus I/O.
pub fn parse_str(source: &str) -> TableResult<PwmTable> {
    collect_rows(
        source.lines().map(|line| Ok(line.to_owned())),
        Path::new(READER_ORIGIN),
    )
}

/// Parse one line of a table source.
///
/// Returns `Ok(None)` for a blank line. `line_number` is 1-based and only used
/// for error reporting.
///
/// # Errors
///
/// Returns [`TableError::MalformedRow`] if the line is not
/// `<command>,<duty_cycle_width>` or the command is not finite.
pub fn parse_row(line_number: usize, line: &str) -> TableResult<Option<PwmPoint>> {
    let row = line.trim();
    if row.is_empty() {
        return Ok(None);
    }

    let Some((command, duty_cycle)) = row.split_once(',') else {
        return Err(TableError::malformed_row(
            line_number,
            row,
            "missing ',' separator",
        ));
    };

    let command = command.trim();
    let command: f64 = command.parse().map_err(|e| {
        TableError::malformed_row(line_number, row, format!("invalid command {command:?}: {e}"))
    })?;
    if !command.is_finite() {
        return Err(TableError::malformed_row(
            line_number,
            row,
            "command must be finite",
        ));
    }

    let duty_cycle = duty_cycle.trim();
    let duty_cycle: u32 = duty_cycle.parse().map_err(|e| {
        TableError::malformed_row(
            line_number,
            row,
            format!("invalid duty cycle width {duty_cycle:?}: {e}"),
        )
    })?;

    Ok(Some(PwmPoint::new(command, duty_cycle)))
}

fn collect_rows<I>(lines: I, origin: &Path) -> TableResult<PwmTable>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut cmd = Vec::new();
    let mut duty = Vec::new();

    for (index, line) in lines.enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| TableError::io(origin, e))?;

        let Some(point) = parse_row(line_number, &line)? else {
            continue;
        };

        if let Some(&previous) = cmd.last()
            && point.command < previous
        {
            return Err(TableError::Unsorted {
                line: line_number,
                previous,
                current: point.command,
            });
        }

        trace!(
            line = line_number,
            command = point.command,
            duty_cycle = point.duty_cycle,
            "Parsed PWM table row"
        );
        cmd.push(point.command);
        duty.push(point.duty_cycle);
    }

    if cmd.is_empty() {
        return Err(TableError::EmptyTable);
    }

    PwmTable::new(cmd, duty)
}

impl PwmTable {
    /// Load a table from a file. See [`load`].
    ///
    /// # Errors
    ///
    /// Same conditions as [`load`].
    pub fn load(path: impl AsRef<Path>) -> TableResult<Self> {
        load(path)
    }
}

impl FromStr for PwmTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
