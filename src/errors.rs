use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Import failed at line {line}: {source}")]
    Import {
        line: u64,
        #[source]
        source: ValidationError,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Recoverable input errors. Interactive callers re-prompt on these instead of
/// aborting the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("The price should be in the format of 10.99 or $10.99 (got '{0}')")]
    BadPriceFormat(String),

    #[error("The date should be in the format of M/D/YYYY (got '{0}')")]
    BadDateFormat(String),

    #[error("The id should be a number (got '{0}')")]
    NonNumericId(String),

    #[error("The product id {0} is not in the database")]
    UnknownId(i64),

    #[error("The quantity should be a non-negative whole number (got '{0}')")]
    BadQuantity(String),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
