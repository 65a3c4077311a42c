use chrono::NaiveDate;
use std::collections::HashSet;

use crate::parse::extract::FlightRecord;

/// Render, deduplicate, and sort the final report.
///
/// Deduplication is on the rendered two-line text, not on the structured
/// record: two records that format identically collapse to one. Sorting is
/// by (date, detail line), where the date is recovered by parsing the
/// rendered `ddMMM` line back with `year` — a deliberately lossy round
/// trip kept from the observed behavior, which can misorder records whose
/// next-day adjustment crossed a year boundary.
pub fn render_report(records: &[FlightRecord], year: i32) -> String {
    let mut seen = HashSet::new();
    let mut lines: Vec<String> = Vec::new();
    for record in records {
        let rendered = record.render();
        if seen.insert(rendered.clone()) {
            lines.push(rendered);
        }
    }

    lines.sort_by_cached_key(|rendered| sort_key(rendered, year));
    lines.join("\n")
}

fn sort_key(rendered: &str, year: i32) -> (NaiveDate, String) {
    let (date_line, detail) = rendered.split_once('\n').unwrap_or((rendered, ""));
    let date = NaiveDate::parse_from_str(&format!("{}{}", date_line, year), "%d%b%Y")
        .unwrap_or_default();
    (date, detail.to_string())
}
