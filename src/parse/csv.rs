use winnow::ascii::{line_ending, space0};
use winnow::combinator::{alt, delimited, eof, repeat, separated, terminated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::take_till;

// -- Cells ------------------------------------------------------------------

fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited(
        (space0, '"'),
        repeat(0.., alt((take_till(1.., '"'), "\"\"".value("\"")))).fold(
            String::new,
            |mut cell, part: &str| {
                cell.push_str(part);
                cell
            },
        ),
        ('"', space0),
    )
    .parse_next(input)
}

fn bare<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(0.., [',', '\r', '\n']).parse_next(input)
}

fn cell(input: &mut &str) -> ModalResult<String> {
    alt((quoted, bare.map(str::to_owned))).parse_next(input)
}

// -- Records ----------------------------------------------------------------

fn record(input: &mut &str) -> ModalResult<Vec<String>> {
    terminated(
        separated(1.., cell, ','),
        alt((line_ending.void(), eof.void())),
    )
    .parse_next(input)
}

/// Every record of the text, cells untouched.
pub(crate) fn records(input: &mut &str) -> ModalResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    while !input.is_empty() {
        rows.push(record.parse_next(input)?);
    }
    Ok(rows)
}

/// Trim every cell, drop a `#` comment cell and everything after it, and
/// return `None` for rows left with no content.
pub(crate) fn clean(row: Vec<String>) -> Option<Vec<String>> {
    let cells: Vec<String> = row
        .into_iter()
        .map(|cell| cell.trim().to_owned())
        .take_while(|cell| !cell.starts_with('#'))
        .collect();
    if cells.iter().all(String::is_empty) {
        return None;
    }
    Some(cells)
}
