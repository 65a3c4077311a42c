use thiserror::Error;

/// Failure modes of a schedule parse.
///
/// Only the first two are expected in practice: structural anomalies that
/// abort the whole parse with no partial output. Row- and column-level
/// anomalies are recovered by skipping and never surface here.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No row's first cell contains the "day" marker.
    #[error("date header not found")]
    HeaderNotFound,

    /// No qualifying start-of-data row below the date header.
    #[error("flight data block not found")]
    FlightBlockNotFound,

    /// The delimited-text decoding itself failed; the parse never starts.
    #[error("malformed schedule input: {0}")]
    MalformedInput(#[from] csv::Error),

    /// Input exceeds the row bound; not a plausible schedule export.
    #[error("schedule input exceeds {max_rows} rows")]
    InputTooLarge { max_rows: usize },
}
