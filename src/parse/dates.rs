use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static ALL_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("static regex"));

/// Column→date step function built from the date header row.
///
/// Keys are inserted left-to-right as the header is scanned, so `entries`
/// is sorted by construction. The effective date at a column is the date
/// bound to the greatest key at or left of it; columns left of the first
/// key have no date.
#[derive(Debug, Clone)]
pub struct ColumnDateMap {
    entries: Vec<(usize, NaiveDate)>,
}

impl ColumnDateMap {
    /// Scan the header row and forward-fill dates across columns.
    ///
    /// A cell containing "day" contributes a new anchor: its first
    /// all-digit whitespace-separated token is the day-of-month, composed
    /// with `month` (a fixed three-letter abbreviation, see
    /// [`crate::parse::ParseOptions`]) and `year`. A failed compose drops
    /// the running date until the next good anchor; cells without "day"
    /// inherit whatever date is currently established.
    pub fn from_header(header_row: &[String], month: &str, year: i32) -> Self {
        let mut entries = Vec::new();
        let mut current: Option<NaiveDate> = None;

        for (col, cell) in header_row.iter().enumerate() {
            let lower = cell.to_lowercase();
            if lower.contains("day") {
                if let Some(day) = lower.split_whitespace().find(|t| ALL_DIGITS.is_match(t)) {
                    current = compose_date(day, month, year);
                }
            }
            if let Some(date) = current {
                entries.push((col, date));
            }
        }

        ColumnDateMap { entries }
    }

    /// Effective date at `col`: value of the step function, i.e. the date
    /// bound to the greatest key ≤ `col`.
    pub fn resolve(&self, col: usize) -> Option<NaiveDate> {
        let n = self.entries.partition_point(|&(key, _)| key <= col);
        (n > 0).then(|| self.entries[n - 1].1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compose `{day}{month}{year}` and parse it as `%d%b%Y`, zero-padding the
/// day. Returns `None` when the pieces don't form a real date.
fn compose_date(day: &str, month: &str, year: i32) -> Option<NaiveDate> {
    let composed = format!("{:0>2}{}{}", day, month, year);
    NaiveDate::parse_from_str(&composed, "%d%b%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchors_forward_fill_across_unlabeled_columns() {
        let map = ColumnDateMap::from_header(&row(&["DAY 01", "", "", "DAY 02", ""]), "DEC", 2024);
        assert_eq!(map.resolve(0), Some(date(2024, 12, 1)));
        assert_eq!(map.resolve(2), Some(date(2024, 12, 1)));
        assert_eq!(map.resolve(3), Some(date(2024, 12, 2)));
        // step function extends right past the header's width
        assert_eq!(map.resolve(100), Some(date(2024, 12, 2)));
    }

    #[test]
    fn columns_left_of_first_anchor_are_unmapped() {
        let map = ColumnDateMap::from_header(&row(&["", "x", "DAY 05", ""]), "DEC", 2024);
        assert_eq!(map.resolve(0), None);
        assert_eq!(map.resolve(1), None);
        assert_eq!(map.resolve(2), Some(date(2024, 12, 5)));
    }

    #[test]
    fn day_cell_without_digits_inherits_running_date() {
        let map = ColumnDateMap::from_header(&row(&["DAY 03", "Monday", ""]), "DEC", 2024);
        assert_eq!(map.resolve(1), Some(date(2024, 12, 3)));
        assert_eq!(map.resolve(2), Some(date(2024, 12, 3)));
    }

    #[test]
    fn bad_anchor_drops_the_running_date() {
        // day 40 does not exist; columns from there on are unmapped until
        // the next good anchor
        let map =
            ColumnDateMap::from_header(&row(&["DAY 01", "DAY 40", "", "DAY 02"]), "DEC", 2024);
        assert_eq!(map.resolve(0), Some(date(2024, 12, 1)));
        assert_eq!(map.resolve(1), None);
        assert_eq!(map.resolve(2), None);
        assert_eq!(map.resolve(3), Some(date(2024, 12, 2)));
    }

    #[test]
    fn single_digit_days_are_zero_padded() {
        let map = ColumnDateMap::from_header(&row(&["day 7"]), "DEC", 2024);
        assert_eq!(map.resolve(0), Some(date(2024, 12, 7)));
    }

    #[test]
    fn month_is_an_explicit_parameter() {
        let map = ColumnDateMap::from_header(&row(&["DAY 15"]), "FEB", 2025);
        assert_eq!(map.resolve(0), Some(date(2025, 2, 15)));
    }

    #[test]
    fn header_without_anchors_yields_empty_map() {
        let map = ColumnDateMap::from_header(&row(&["Monday", "Tuesday"]), "DEC", 2024);
        assert!(map.is_empty());
        assert_eq!(map.resolve(0), None);
    }
}
