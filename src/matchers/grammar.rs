use winnow::ascii::space0;
use winnow::combinator::{alt, opt};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{one_of, rest, take_until, take_while};

use crate::numeric::numeric_literal;
use crate::CompareOp;

// -- Shared tokens ----------------------------------------------------------

pub(crate) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn numeric_comparator(input: &mut &str) -> ModalResult<CompareOp> {
    alt((
        "<=".value(CompareOp::Lte),
        ">=".value(CompareOp::Gte),
        "!=".value(CompareOp::Neq),
        "<".value(CompareOp::Lt),
        ">".value(CompareOp::Gt),
    ))
    .parse_next(input)
}

fn symbol_comparator(input: &mut &str) -> ModalResult<CompareOp> {
    alt((
        ":=".value(CompareOp::Eq),
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Neq),
        "<=".value(CompareOp::Lte),
        ">=".value(CompareOp::Gte),
        "=".value(CompareOp::Eq),
        "<".value(CompareOp::Lt),
        ">".value(CompareOp::Gt),
    ))
    .parse_next(input)
}

// -- Numeric comparison: `<op><number>` ---------------------------------------

fn numeric_compare<'i>(input: &mut &'i str) -> ModalResult<(CompareOp, &'i str)> {
    let op = numeric_comparator.parse_next(input)?;
    space0.parse_next(input)?;
    let operand = numeric_literal.parse_next(input)?;
    Ok((op, operand))
}

pub(crate) fn parse_numeric_compare(cell: &str) -> Option<(CompareOp, &str)> {
    numeric_compare.parse(cell).ok()
}

// -- Range: `[!]<min>..<max>` / `[!]<min>...<max>` -----------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RangeParts<'i> {
    pub negate: bool,
    pub min: &'i str,
    pub max: &'i str,
    pub exclusive: bool,
}

fn range<'i>(input: &mut &'i str) -> ModalResult<RangeParts<'i>> {
    let negate = opt('!').parse_next(input)?.is_some();
    space0.parse_next(input)?;
    let min = take_until(1.., "..").parse_next(input)?;
    let exclusive = alt(("...".value(true), "..".value(false))).parse_next(input)?;
    let max = rest.parse_next(input)?;
    Ok(RangeParts {
        negate,
        min: min.trim(),
        max: max.trim(),
        exclusive,
    })
}

pub(crate) fn parse_range(cell: &str) -> Option<RangeParts<'_>> {
    range.parse(cell).ok()
}

// -- Pattern: `=~ re`, `!~ re`, `!= text` ------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PatternOp {
    Match,
    NoMatch,
    NotEqual,
}

fn pattern<'i>(input: &mut &'i str) -> ModalResult<(PatternOp, &'i str)> {
    let op = alt((
        "=~".value(PatternOp::Match),
        "!~".value(PatternOp::NoMatch),
        "!=".value(PatternOp::NotEqual),
    ))
    .parse_next(input)?;
    space0.parse_next(input)?;
    let text = rest.parse_next(input)?;
    Ok((op, text))
}

pub(crate) fn parse_pattern(cell: &str) -> Option<(PatternOp, &str)> {
    pattern.parse(cell).ok()
}

// -- Constant: `:= nil`, `= true`, `== 3.5` ----------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstantLit<'i> {
    Nil,
    Bool(bool),
    Number(&'i str),
}

fn constant<'i>(input: &mut &'i str) -> ModalResult<ConstantLit<'i>> {
    alt((":=", "==", "=")).parse_next(input)?;
    space0.parse_next(input)?;
    alt((
        "nil".value(ConstantLit::Nil),
        "true".value(ConstantLit::Bool(true)),
        "false".value(ConstantLit::Bool(false)),
        numeric_literal.map(ConstantLit::Number),
    ))
    .parse_next(input)
}

pub(crate) fn parse_constant(cell: &str) -> Option<ConstantLit<'_>> {
    constant.parse(cell).ok()
}

// -- Symbol reference: `[op]:name` -------------------------------------------

fn symbol<'i>(input: &mut &'i str) -> ModalResult<(CompareOp, &'i str)> {
    let op = opt(symbol_comparator)
        .parse_next(input)?
        .unwrap_or(CompareOp::Eq);
    space0.parse_next(input)?;
    ':'.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    Ok((op, name))
}

pub(crate) fn parse_symbol(cell: &str) -> Option<(CompareOp, &str)> {
    symbol.parse(cell).ok()
}

// -- Guard: `[!]:name <op> <operand>` -----------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GuardOp {
    Compare(CompareOp),
    Regex { matches: bool },
    Call,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GuardParts<'i> {
    pub negate: bool,
    pub name: &'i str,
    pub op: GuardOp,
    pub operand: &'i str,
}

fn guard_op(input: &mut &str) -> ModalResult<GuardOp> {
    alt((
        "==".value(GuardOp::Compare(CompareOp::Eq)),
        "!=".value(GuardOp::Compare(CompareOp::Neq)),
        "<=".value(GuardOp::Compare(CompareOp::Lte)),
        ">=".value(GuardOp::Compare(CompareOp::Gte)),
        "=~".value(GuardOp::Regex { matches: true }),
        "!~".value(GuardOp::Regex { matches: false }),
        ":=".value(GuardOp::Compare(CompareOp::Eq)),
        "=".value(GuardOp::Compare(CompareOp::Eq)),
        "<".value(GuardOp::Compare(CompareOp::Lt)),
        ">".value(GuardOp::Compare(CompareOp::Gt)),
        ".".value(GuardOp::Call),
    ))
    .parse_next(input)
}

fn guard<'i>(input: &mut &'i str) -> ModalResult<GuardParts<'i>> {
    let negate = opt('!').parse_next(input)?.is_some();
    space0.parse_next(input)?;
    ':'.parse_next(input)?;
    let name = identifier.parse_next(input)?;
    space0.parse_next(input)?;
    let op = guard_op.parse_next(input)?;
    space0.parse_next(input)?;
    let operand = rest.parse_next(input)?;
    Ok(GuardParts {
        negate,
        name,
        op,
        operand: operand.trim(),
    })
}

pub(crate) fn parse_guard(cell: &str) -> Option<GuardParts<'_>> {
    guard.parse(cell).ok().filter(|parts| !parts.operand.is_empty())
}
