use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::parse::ScheduleError;

/// Upper bound on grid rows; anything past this is not a schedule export.
pub const MAX_ROWS: usize = 50_000;

/// The fully loaded tabular input: rows of trimmed cell strings.
///
/// No header row is assumed at this level and rows are not required to be
/// uniform length. Out-of-range cell access yields `""`, never an error.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Load a grid from raw comma-delimited text. The only fatal condition
    /// is a decoding failure in the reader itself (or an input past the
    /// row bound); structurally short rows are fine.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScheduleError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            if rows.len() >= MAX_ROWS {
                return Err(ScheduleError::InputTooLarge { max_rows: MAX_ROWS });
            }
            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }
        Ok(Grid { rows })
    }

    pub fn from_str(input: &str) -> Result<Self, ScheduleError> {
        Self::from_reader(input.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let file = File::open(path.as_ref())
            .map_err(|e| ScheduleError::MalformedInput(csv::Error::from(e)))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of one row; 0 for a row index past the grid.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Total cell accessor: defined for every (row, col), empty string when
    /// the index falls outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }
}
