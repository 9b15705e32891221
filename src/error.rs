use thiserror::Error;

/// Fatal errors raised by the scoring core.
///
/// Per-row problems (unknown types, bad numbers, zero floor area) are never
/// errors; they surface as diagnostics on the scored row instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "could not locate section boundary in benchmark sheet '{sheet}': expected two '{marker}' markers in column {column}, found {found}"
    )]
    SectionBoundary {
        sheet: String,
        marker: String,
        column: usize,
        found: usize,
    },

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub type Result<T> = std::result::Result<T, Error>;
