//! Text front-end: CSV rows, option rows above the header, and header cells.
//!
//! ```text
//! # comment rows and blank rows are skipped
//! accumulate, index: 1
//! in :topic,  in :region, out :team_member
//! sports,     Europe,     Alice
//! finance,    ,           Ernest
//! ```

mod csv;
mod error;
mod header;
mod options;

pub use error::ParseError;
pub(crate) use header::parse_header_cell;

use crate::Options;
use options::{parse_option_cell, OptionCell};

/// CSV text split into options and rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// The options passed to [`parse`] with every option row applied on top.
    pub options: Options,
    /// Header row first, then the data rows. Rows shorter than the header are
    /// padded with empty cells.
    pub rows: Vec<Vec<String>>,
}

/// Parse CSV text into a [`ParsedTable`].
///
/// Cells are trimmed, a cell starting with `#` comments out the rest of its
/// row, and empty rows are skipped. Rows before the header whose first cell
/// is an option (`accumulate`, `first_match`, `regexp_implicit`,
/// `text_only`, `index: N`) override `options`.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not well-formed CSV or an option row
/// holds a cell that is not an option.
pub fn parse(input: &str, options: Options) -> Result<ParsedTable, ParseError> {
    use winnow::Parser;

    let records = csv::records.parse(input).map_err(|e| {
        ParseError::at_offset(input, e.offset(), "expected ',' or end of line after a cell")
    })?;

    let mut rows = records
        .into_iter()
        .enumerate()
        .filter_map(|(line, row)| csv::clean(row).map(|row| (line + 1, row)));
    let mut options = options;
    let mut header = None;
    for (line, row) in rows.by_ref() {
        match option_row(&row).map_err(|cell| {
            ParseError::new(line, format!("'{cell}' in an option row is not an option"))
        })? {
            Some(cells) => options = cells.into_iter().fold(options, |acc, c| c.apply(acc)),
            None => {
                header = Some(row);
                break;
            }
        }
    }

    let Some(header) = header else {
        return Ok(ParsedTable {
            options,
            rows: Vec::new(),
        });
    };
    let width = header.len();
    let mut table = vec![header];
    table.extend(rows.map(|(_, row)| fit(row, width)));
    Ok(ParsedTable {
        options,
        rows: table,
    })
}

/// `Ok(None)` when the row is not an option row; `Err(cell)` for a non-option
/// cell in one.
fn option_row(row: &[String]) -> Result<Option<Vec<OptionCell>>, String> {
    let Some(first) = row.first().and_then(|cell| parse_option_cell(cell)) else {
        return Ok(None);
    };
    let mut cells = vec![first];
    for cell in row.iter().skip(1).filter(|cell| !cell.is_empty()) {
        cells.push(parse_option_cell(cell).ok_or_else(|| cell.clone())?);
    }
    Ok(Some(cells))
}

/// Pad to `width`; drop empty cells hanging past it.
fn fit(mut row: Vec<String>, width: usize) -> Vec<String> {
    while row.len() > width && row.last().is_some_and(String::is_empty) {
        row.pop();
    }
    if row.len() < width {
        row.resize(width, String::new());
    }
    row
}
