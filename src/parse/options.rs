use winnow::ascii::{dec_uint, space0, space1, Caseless};
use winnow::combinator::{alt, preceded};
use winnow::error::ModalResult;
use winnow::prelude::*;

use crate::Options;

/// One option cell from the rows above a table's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptionCell {
    FirstMatch,
    Accumulate,
    RegexpImplicit,
    TextOnly,
    Index(usize),
}

impl OptionCell {
    pub(crate) fn apply(self, options: Options) -> Options {
        match self {
            OptionCell::FirstMatch => options.first_match(true),
            OptionCell::Accumulate => options.accumulate(),
            OptionCell::RegexpImplicit => options.regexp_implicit(true),
            OptionCell::TextOnly => options.text_only(true),
            OptionCell::Index(columns) => options.index(columns),
        }
    }
}

fn index(input: &mut &str) -> ModalResult<usize> {
    preceded(
        (Caseless("index"), alt(((space0, ':', space0).void(), space1.void()))),
        dec_uint,
    )
    .parse_next(input)
}

fn option_cell(input: &mut &str) -> ModalResult<OptionCell> {
    alt((
        index.map(OptionCell::Index),
        Caseless("first_match").value(OptionCell::FirstMatch),
        Caseless("accumulate").value(OptionCell::Accumulate),
        Caseless("regexp_implicit").value(OptionCell::RegexpImplicit),
        Caseless("text_only").value(OptionCell::TextOnly),
    ))
    .parse_next(input)
}

/// Parse a whole cell as an option, or `None` when it is not one.
pub(crate) fn parse_option_cell(cell: &str) -> Option<OptionCell> {
    option_cell.parse(cell).ok()
}
