use std::fmt;
use std::path::Path;

use super::column::Columns;
use super::decision::Decision;
use super::error::{CompileError, DecideError};
use super::input::Input;
use super::options::Options;
use super::report::DecisionReport;
use crate::index::Index;
use crate::matchers::PredicateKind;
use crate::scan::CompiledRow;
use crate::DectableError;

/// Builder for a [`DecisionTable`] from in-memory string rows.
///
/// # Example
///
/// ```
/// use dectable::{Input, TableBuilder, Value};
///
/// let table = TableBuilder::new()
///     .header(["in :topic", "in :region", "out :team_member"])
///     .row(["sports", "Europe", "Alice"])
///     .row(["sports", "", "Bob"])
///     .row(["", "", "Zach"])
///     .compile()
///     .unwrap();
///
/// let decision = table
///     .decide(&Input::new().set("topic", "sports").set("region", "Asia"))
///     .unwrap();
/// assert_eq!(decision.get("team_member"), Some(&Value::from("Bob")));
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    options: Options,
}

impl TableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header row. Calling it again replaces the previous header.
    #[must_use]
    pub fn header<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = cells.into_iter().map(Into::into).collect();
        self
    }

    /// Append a data row.
    #[must_use]
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Compile the header and rows into an immutable [`DecisionTable`].
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] if validation fails.
    pub fn compile(self) -> Result<DecisionTable, CompileError> {
        let mut rows = Vec::with_capacity(self.rows.len() + 1);
        rows.push(self.header);
        rows.extend(self.rows);
        DecisionTable::from_rows(&rows, self.options)
    }
}

/// A compiled, immutable decision table. Thread-safe and designed to live
/// behind `Arc`.
#[derive(Debug, Clone)]
pub struct DecisionTable {
    pub(crate) columns: Columns,
    pub(crate) rows: Vec<CompiledRow>,
    pub(crate) index: Option<Index>,
    pub(crate) options: Options,
}

impl DecisionTable {
    /// Compile data rows against an already-built column dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] for an empty body, a row whose width differs
    /// from the dictionary, a malformed cell, or an invalid option.
    pub fn compile<R, S>(rows: &[R], columns: Columns, options: Options) -> Result<Self, CompileError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        crate::compile::compile(rows, columns, options)
    }

    /// Compile a header row followed by data rows.
    ///
    /// Header columns left blank are dropped when every data cell below them
    /// is blank too.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on a malformed or missing header, a blank
    /// header over data, or any error from [`compile`](Self::compile).
    pub fn from_rows<R, S>(rows: &[R], options: Options) -> Result<Self, CompileError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let Some((header, body)) = rows.split_first() else {
            return Err(CompileError::EmptyTable);
        };
        let header = header.as_ref();

        for (i, row) in body.iter().enumerate() {
            let found = row.as_ref().len();
            if found != header.len() {
                return Err(CompileError::RaggedRow {
                    row: i + 1,
                    expected: header.len(),
                    found,
                });
            }
        }

        let mut keep = Vec::with_capacity(header.len());
        for (col, cell) in header.iter().enumerate() {
            if !cell.as_ref().trim().is_empty() {
                keep.push(col);
                continue;
            }
            let used = body
                .iter()
                .position(|row| !row.as_ref()[col].as_ref().trim().is_empty());
            if let Some(row) = used {
                return Err(CompileError::InvalidHeader {
                    column: col,
                    cell: String::new(),
                    reason: format!("blank header over data in row {}", row + 1),
                });
            }
        }

        let columns = Columns::from_cells(keep.iter().map(|&col| (col, header[col].as_ref())))?;
        let body: Vec<Vec<&str>> = body
            .iter()
            .map(|row| {
                let row = row.as_ref();
                keep.iter().map(|&col| row[col].as_ref()).collect()
            })
            .collect();
        Self::compile(&body, columns, options)
    }

    /// Parse CSV text and compile it. Option rows above the header override
    /// `options`.
    ///
    /// # Errors
    ///
    /// Returns [`DectableError`] on parse or compile failure.
    pub fn from_csv(text: &str, options: Options) -> Result<Self, DectableError> {
        let parsed = crate::parse::parse(text, options)?;
        Ok(Self::from_rows(&parsed.rows, parsed.options)?)
    }

    /// Read a CSV file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`DectableError::Source`] wrapping the I/O, parse, or compile
    /// failure together with the file path.
    pub fn from_file(path: impl AsRef<Path>, options: Options) -> Result<Self, DectableError> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map_err(DectableError::from)
            .and_then(|text| Self::from_csv(&text, options))
            .map_err(|source| DectableError::Source {
                path: path.to_path_buf(),
                source: Box::new(source),
            })
    }

    /// Decide an input against this table.
    ///
    /// Returns the empty decision when no row matches. Uses the index when
    /// the table has one.
    ///
    /// # Errors
    ///
    /// Returns [`DecideError::EmptyInput`] for an empty input record.
    pub fn decide(&self, input: &Input) -> Result<Decision, DecideError> {
        crate::evaluate::decide(self, input)
    }

    /// Decide with a full table scan, ignoring any index. Always agrees with
    /// [`decide`](Self::decide).
    ///
    /// # Errors
    ///
    /// Returns [`DecideError::EmptyInput`] for an empty input record.
    pub fn decide_unindexed(&self, input: &Input) -> Result<Decision, DecideError> {
        crate::evaluate::decide_unindexed(self, input)
    }

    /// Decide with diagnostics: the rows scanned and matched, whether the
    /// index was used, and timing.
    ///
    /// # Errors
    ///
    /// Returns [`DecideError::EmptyInput`] for an empty input record.
    pub fn decide_detailed(&self, input: &Input) -> Result<DecisionReport, DecideError> {
        crate::evaluate::decide_detailed(self, input)
    }

    #[must_use]
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn index(&self) -> Option<&Index> {
        self.index.as_ref()
    }

    /// How the cell at `row`, `column` compiled. `None` for blank cells,
    /// literal text, and positions outside the table.
    #[must_use]
    pub fn cell_kind(&self, row: usize, column: usize) -> Option<PredicateKind> {
        self.rows.get(row)?.cells.get(column)?.kind()
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for DecisionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DecisionTable({} rows, {} columns",
            self.rows.len(),
            self.columns.len()
        )?;
        if let Some(index) = &self.index {
            write!(f, ", {} index keys", index.len())?;
        }
        write!(f, ")")
    }
}
