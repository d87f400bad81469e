use thiserror::Error;

/// Raised when the age tables cannot be joined into consistent records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataJoinError {
    #[error("table '{table}' has {actual} rows, primary table has {expected}")]
    RowCountMismatch { table: String, expected: usize, actual: usize },

    #[error("row {row} of table '{table}' is '{found}', primary table has '{expected}'")]
    RegionMismatch { table: String, row: usize, expected: String, found: String },

    #[error("region '{region}' missing from table '{table}'")]
    MissingRegion { table: String, region: String },

    #[error("year '{year}' missing from table '{table}'")]
    MissingYear { table: String, year: String },

    #[error("table '{table}' has year columns {extra:?} the primary table lacks")]
    YearSetMismatch { table: String, extra: Vec<String> },

    #[error("proportion tables need a '{0}' table to scale against")]
    MissingTable(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatioError {
    #[error("male ratio must be positive and finite, got {0}")]
    InvalidMaleRatio(f64),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table has no header row")]
    MissingHeader,

    #[error("table has a region column but no year columns")]
    NoYearColumns,

    #[error("rows '{first}' and '{second}' both key as '{key}'")]
    DuplicateRegion { key: String, first: String, second: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
