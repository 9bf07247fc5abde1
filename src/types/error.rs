use thiserror::Error;

/// Errors raised while building a decision table. A table that fails to
/// compile is never partially usable.
///
/// Data rows are numbered from 1 (the first row below the header); columns
/// are numbered from 0.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("invalid header cell '{cell}' in column {column}: {reason}")]
    InvalidHeader {
        column: usize,
        cell: String,
        reason: String,
    },

    #[error("duplicate output column name '{name}'")]
    DuplicateOutput { name: String },

    #[error("output column name '{name}' is also used as an input column")]
    OutputShadowsInput { name: String },

    #[error("table has no input or guard columns")]
    NoInputColumns,

    #[error("table has no output columns")]
    NoOutputColumns,

    #[error("table has no data rows")]
    EmptyTable,

    #[error("row {row} has {found} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell '{cell}' at row {row}, column {column}: {reason}")]
    InvalidCell {
        row: usize,
        column: usize,
        cell: String,
        reason: String,
    },

    #[error("invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("index of {index} columns exceeds the {inputs} input columns")]
    IndexTooWide { index: usize, inputs: usize },

    #[error("index key cell at row {row}, column {column} is empty")]
    EmptyIndexKey { row: usize, column: usize },
}

/// Errors raised by a decision call before any row is scanned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("input record is empty")]
    EmptyInput,
}
