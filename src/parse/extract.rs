use chrono::NaiveDate;
use tracing::warn;

use crate::grid::Grid;
use crate::parse::dates::ColumnDateMap;
use crate::parse::SERVICE_CODE_PREFIX;

/// Upper bound on 3-row groups walked in one parse.
const MAX_BLOCKS: usize = 10_000;

/// One scheduled flight on one calendar date, next-day adjustment already
/// applied. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRecord {
    pub flight_number: String,
    /// Prefixed service code; empty when the column carried none.
    pub service_code: String,
    pub route: String,
    /// Normalized time: next-day marker and internal whitespace stripped.
    pub time: String,
    pub date: NaiveDate,
}

impl FlightRecord {
    /// Two-line rendering: date as `ddMMM` uppercased, then the detail
    /// line with single-space separators. An empty service code leaves a
    /// double space; that is the report's observed surface form.
    pub fn render(&self) -> String {
        let date_line = self.date.format("%d%b").to_string().to_uppercase();
        format!(
            "{}\n{} {} {} {}",
            date_line, self.flight_number, self.service_code, self.route, self.time
        )
    }
}

/// Walk the grid from the flight-block start in groups of exactly 3 rows
/// (flight numbers, routes, times), emitting one record per populated
/// column. Blank separator rows between blocks do not count toward the
/// stride; a trailing partial group ends extraction without error.
pub fn extract_flights(grid: &Grid, start_row: usize, map: &ColumnDateMap) -> Vec<FlightRecord> {
    let mut records = Vec::new();
    let mut idx = start_row;
    let mut blocks = 0usize;

    while idx < grid.len() {
        while idx < grid.len() && grid.cell(idx, 0).is_empty() {
            idx += 1;
        }
        if idx + 2 >= grid.len() {
            break;
        }
        if blocks >= MAX_BLOCKS {
            warn!(blocks, "flight block bound reached, stopping extraction");
            break;
        }
        blocks += 1;

        let (flight_row, route_row, time_row) = (idx, idx + 1, idx + 2);
        idx += 3;

        let flight_number = grid
            .cell(flight_row, 0)
            .split(',')
            .next()
            .unwrap_or_default()
            .trim();
        if flight_number.is_empty() {
            continue;
        }

        for col in 1..grid.row_len(flight_row) {
            let service_raw = grid.cell(flight_row, col);
            let service_code = if service_raw.is_empty() {
                String::new()
            } else {
                format!("{}{}", SERVICE_CODE_PREFIX, service_raw)
            };

            let route = grid.cell(route_row, col);
            let time_raw = grid.cell(time_row, col);
            if route.is_empty() || time_raw.is_empty() {
                continue;
            }

            let Some(mut date) = map.resolve(col) else {
                continue;
            };

            let next_day = time_raw.contains('+');
            let time: String = time_raw
                .chars()
                .filter(|c| *c != '+' && !c.is_whitespace())
                .collect();
            if time.is_empty() {
                continue;
            }
            if next_day {
                match date.succ_opt() {
                    Some(d) => date = d,
                    None => continue,
                }
            }

            records.push(FlightRecord {
                flight_number: flight_number.to_string(),
                service_code,
                route: route.to_string(),
                time,
                date,
            });
        }
    }

    records
}
