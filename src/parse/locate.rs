use crate::grid::Grid;
use crate::parse::ScheduleError;

/// Find the date header row: the first row whose first cell contains the
/// substring "day", case-insensitively.
pub fn find_date_header(grid: &Grid) -> Result<usize, ScheduleError> {
    (0..grid.len())
        .find(|&i| grid.cell(i, 0).to_lowercase().contains("day"))
        .ok_or(ScheduleError::HeaderNotFound)
}

/// Find the first flight data row: starting two rows below the header,
/// the first row whose first cell is non-empty and does not parse as a
/// plain decimal number (the numeric rows in between are day-of-week
/// counters, not flight numbers).
pub fn find_flight_block_start(grid: &Grid, header_row: usize) -> Result<usize, ScheduleError> {
    (header_row + 2..grid.len())
        .find(|&i| {
            let first = grid.cell(i, 0);
            !first.is_empty() && first.parse::<f64>().is_err()
        })
        .ok_or(ScheduleError::FlightBlockNotFound)
}
