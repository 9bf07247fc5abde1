use std::path::PathBuf;

use thiserror::Error;

use crate::parse::ParseError;
use crate::{CompileError, DecideError};

/// Unified error type covering parsing, compilation, decisions and I/O.
///
/// Returned by convenience constructors like
/// [`DecisionTable::from_csv()`](crate::DecisionTable::from_csv) and
/// [`DecisionTable::from_file()`](crate::DecisionTable::from_file).
#[derive(Debug, Error)]
pub enum DectableError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Decide(#[from] DecideError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A failure while loading a table from a file.
    #[error("{}: {source}", path.display())]
    Source {
        path: PathBuf,
        source: Box<DectableError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_messages() {
        let err = DectableError::from(CompileError::EmptyTable);
        assert_eq!(err.to_string(), "table has no data rows");
        let err = DectableError::from(DecideError::EmptyInput);
        assert_eq!(err.to_string(), "input record is empty");
    }

    #[test]
    fn source_names_the_path() {
        let err = DectableError::Source {
            path: PathBuf::from("tables/teams.csv"),
            source: Box::new(CompileError::NoOutputColumns.into()),
        };
        assert_eq!(
            err.to_string(),
            "tables/teams.csv: table has no output columns"
        );
    }
}
