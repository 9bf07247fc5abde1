use winnow::ascii::{space0, Caseless};
use winnow::combinator::{alt, opt};
use winnow::error::ModalResult;
use winnow::prelude::*;

use crate::matchers::identifier;
use crate::{Column, CompileError, Role};

struct HeaderParts<'i> {
    role: Role,
    text_only: bool,
    name: Option<&'i str>,
}

fn role(input: &mut &str) -> ModalResult<Role> {
    alt((
        Caseless("guard").value(Role::Guard),
        Caseless("out").value(Role::Output),
        Caseless("in").value(Role::Input),
        Caseless("if").value(Role::If),
    ))
    .parse_next(input)
}

/// `<role>[/text] : [name]`
fn header<'i>(input: &mut &'i str) -> ModalResult<HeaderParts<'i>> {
    let role = role.parse_next(input)?;
    let text_only = opt(('/', Caseless("text"))).parse_next(input)?.is_some();
    (space0, ':', space0).parse_next(input)?;
    let name = opt(identifier).parse_next(input)?;
    space0.parse_next(input)?;
    Ok(HeaderParts {
        role,
        text_only,
        name,
    })
}

/// Classify one header cell. `column` is only used for error messages.
pub(crate) fn parse_header_cell(column: usize, cell: &str) -> Result<Column, CompileError> {
    let invalid = |reason: &str| CompileError::InvalidHeader {
        column,
        cell: cell.to_owned(),
        reason: reason.to_owned(),
    };

    let parts = header
        .parse(cell.trim())
        .map_err(|_| invalid("expected 'in :name', 'out :name', 'guard:' or 'if:'"))?;

    let entry = match (parts.role, parts.name) {
        (Role::Input, Some(name)) => Column::input(name),
        (Role::Output, Some(name)) => Column::output(name),
        (Role::Input | Role::Output, None) => return Err(invalid("column name is missing")),
        (Role::Guard, None) => Column::guard(),
        (Role::If, None) => Column::if_column(),
        (Role::Guard | Role::If, Some(_)) => {
            return Err(invalid("guard and if columns cannot be named"))
        }
    };

    match (parts.text_only, entry.role()) {
        (false, _) => Ok(entry),
        (true, Role::Input | Role::Output) => Ok(entry.text_only()),
        (true, _) => Err(invalid("only input and output columns can be text-only")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(cell: &str) -> String {
        match parse_header_cell(3, cell) {
            Err(CompileError::InvalidHeader { column, reason, .. }) => {
                assert_eq!(column, 3);
                reason
            }
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn named_columns() {
        assert_eq!(parse_header_cell(0, "in :topic"), Ok(Column::input("topic")));
        assert_eq!(parse_header_cell(0, "out:team"), Ok(Column::output("team")));
        assert_eq!(parse_header_cell(0, " IN : region "), Ok(Column::input("region")));
    }

    #[test]
    fn text_only_columns() {
        assert_eq!(
            parse_header_cell(0, "in/text :code"),
            Ok(Column::input("code").text_only())
        );
        assert_eq!(
            parse_header_cell(0, "Out/Text :label"),
            Ok(Column::output("label").text_only())
        );
    }

    #[test]
    fn anonymous_columns() {
        assert_eq!(parse_header_cell(0, "guard:"), Ok(Column::guard()));
        assert_eq!(parse_header_cell(0, "if :"), Ok(Column::if_column()));
    }

    #[test]
    fn rejected_cells() {
        assert!(reason("sideways :x").starts_with("expected"));
        assert!(reason("in :2fast").starts_with("expected"));
        assert_eq!(reason("in :"), "column name is missing");
        assert_eq!(reason("guard: x"), "guard and if columns cannot be named");
        assert_eq!(
            reason("if/text:"),
            "only input and output columns can be text-only"
        );
    }
}
