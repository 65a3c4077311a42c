//! Schedule parser: turns a loosely-formatted tabular schedule export into
//! a deduplicated, date-sorted flight report.
//!
//! The pipeline is strictly sequential: locate the date header row, build
//! the column→date step function from it, locate the first flight data
//! row, walk 3-row flight blocks, then render/dedup/sort. Each invocation
//! is pure and self-contained; nothing is shared between parses.

pub mod dates;
pub mod error;
pub mod extract;
pub mod locate;
pub mod report;

pub use error::ScheduleError;
pub use extract::FlightRecord;

use chrono::{Datelike, Local};

use crate::grid::Grid;
use dates::ColumnDateMap;

/// Month abbreviation applied to every "day N" header anchor. The export
/// never encodes a month of its own; this default matches the observed
/// behavior of the system this replaces and is overridable via
/// [`ParseOptions`].
pub const DEFAULT_MONTH: &str = "DEC";

/// Prefix glued onto non-empty service-code cells.
pub const SERVICE_CODE_PREFIX: &str = "MFX";

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Three-letter month abbreviation for date composition.
    pub month: String,
    /// Calendar year for date composition and the report sort key.
    pub year: i32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            month: DEFAULT_MONTH.to_string(),
            year: Local::now().year(),
        }
    }
}

/// Parse a raw comma-delimited schedule export into the final report text
/// with default options (current year, `DEC`).
pub fn parse_schedule(input: &str) -> Result<String, ScheduleError> {
    parse_schedule_with(input, &ParseOptions::default())
}

pub fn parse_schedule_with(input: &str, opts: &ParseOptions) -> Result<String, ScheduleError> {
    let grid = Grid::from_str(input)?;
    parse_grid(&grid, opts)
}

/// Run the parse pipeline over an already-loaded grid.
pub fn parse_grid(grid: &Grid, opts: &ParseOptions) -> Result<String, ScheduleError> {
    let header_row = locate::find_date_header(grid)?;
    let start_row = locate::find_flight_block_start(grid, header_row)?;

    let header: Vec<String> = (0..grid.row_len(header_row))
        .map(|col| grid.cell(header_row, col).to_string())
        .collect();
    let map = ColumnDateMap::from_header(&header, &opts.month, opts.year);

    let records = extract::extract_flights(grid, start_row, &map);
    Ok(report::render_report(&records, opts.year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions {
            month: "DEC".to_string(),
            year: 2024,
        }
    }

    #[test]
    fn parses_a_full_export_end_to_end() {
        let input = "\
Flight schedule,\n\
DAY 01,,DAY 02,\n\
1,2,3,4\n\
\"AB123,\",X1,X2\n\
,JFK-LAX,JFK-SFO\n\
,10:00,+14:00\n";
        let report = parse_schedule_with(input, &opts()).unwrap();
        // the X2 column sits under DAY 02 and its time carries the next-day
        // marker, so it lands on the 3rd
        let expected = "01DEC\nAB123 MFXX1 JFK-LAX 10:00\n\
                        03DEC\nAB123 MFXX2 JFK-SFO 14:00";
        assert_eq!(report, expected);
    }

    #[test]
    fn no_header_row_is_header_not_found() {
        let err = parse_schedule_with("a,b\nc,d\n", &opts()).unwrap_err();
        assert!(matches!(err, ScheduleError::HeaderNotFound));
        assert_eq!(err.to_string(), "date header not found");
    }

    #[test]
    fn empty_input_is_header_not_found() {
        assert!(matches!(
            parse_schedule_with("", &opts()),
            Err(ScheduleError::HeaderNotFound)
        ));
    }

    #[test]
    fn header_without_data_is_flight_block_not_found() {
        let err = parse_schedule_with("DAY 01,\n,\n1,\n", &opts()).unwrap_err();
        assert!(matches!(err, ScheduleError::FlightBlockNotFound));
        assert_eq!(err.to_string(), "flight data block not found");
    }

    #[test]
    fn structurally_different_inputs_can_collapse() {
        // two blocks for the same flight rendering identically: one record
        let input = "\
DAY 01,\n\
,\n\
AB1,X\n\
,JFK-LAX\n\
,10:00\n\
AB1,X\n\
,JFK-LAX\n\
, 10:0 0\n";
        let report = parse_schedule_with(input, &opts()).unwrap();
        assert_eq!(report, "01DEC\nAB1 MFXX JFK-LAX 10:00");
    }

    #[test]
    fn next_day_wraps_into_the_following_month() {
        let input = "\
DAY 31,\n\
,\n\
AB1,X\n\
,JFK-LAX\n\
,+01:00\n";
        let report = parse_schedule_with(input, &opts()).unwrap();
        assert_eq!(report, "01JAN\nAB1 MFXX JFK-LAX 01:00");
    }

    #[test]
    fn month_override_flows_through_to_the_report() {
        let input = "\
DAY 05,\n\
,\n\
AB1,X\n\
,JFK-LAX\n\
,10:00\n";
        let o = ParseOptions {
            month: "MAR".to_string(),
            year: 2025,
        };
        let report = parse_schedule_with(input, &o).unwrap();
        assert_eq!(report, "05MAR\nAB1 MFXX JFK-LAX 10:00");
    }

    #[test]
    fn invocations_are_independent() {
        let input = "\
DAY 01,\n\
,\n\
AB1,X\n\
,JFK-LAX\n\
,10:00\n";
        let first = parse_schedule_with(input, &opts()).unwrap();
        let second = parse_schedule_with(input, &opts()).unwrap();
        assert_eq!(first, second);
    }
}
