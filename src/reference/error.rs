/// Errors that can occur while loading reference tables
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// I/O error reading a table file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Missing required column in a reference table
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn {
        /// Table being loaded
        table: &'static str,
        /// Column that was expected
        column: String,
    },

    /// A cell could not be interpreted
    #[error("Invalid value '{value}' in {table} table, line {line}, column '{column}'")]
    InvalidValue {
        /// Table being loaded
        table: &'static str,
        /// Line number in the source file (1-based, header included)
        line: u64,
        /// Column name
        column: String,
        /// Raw cell text
        value: String,
    },

    /// The loaded data violates an ordering or range assumption
    #[error("Reference data integrity error: {0}")]
    DataIntegrity(String),
}
