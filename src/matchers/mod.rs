//! Cell expression recognizers.
//!
//! Each matcher is a pure function from cell text to an optional compiled
//! [`Cell`]. Input cells run through the enabled matchers in order
//! ([`MatcherKind::DEFAULT`] unless the options say otherwise) and the first
//! recognizer wins; a cell no matcher recognizes stays a plain text literal.

mod grammar;
mod operation;
mod predicate;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::numeric::{is_numeric_literal, numeric, to_numeric};
use crate::types::Record;
use crate::{CompareOp, MatcherKind, Value};

use grammar::{ConstantLit, GuardOp, PatternOp};
pub(crate) use grammar::identifier;
pub(crate) use predicate::Predicate;
pub use predicate::PredicateKind;
use predicate::{anchored, Bounds, Guard, GuardTest, Operand, PatternTest, RangeTest};

/// A compiled table cell.
#[derive(Debug, Clone)]
pub(crate) enum Cell {
    /// Empty input cell (matches anything) or empty output cell (nil).
    Blank,
    /// Literal text, compared by the input's text form.
    Text(String),
    /// A decoded constant (`:= nil`, `= 5`).
    Const(Value),
    Pred(Predicate),
}

/// Why a cell was rejected.
pub(crate) type Rejection = String;

type MatchResult = Result<Option<Cell>, Rejection>;

/// Settings shared by the matchers of one table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchContext<'a> {
    pub matchers: &'a [MatcherKind],
    pub regexp_implicit: bool,
}

impl Cell {
    /// Phase-one test for constant columns.
    pub(crate) fn matches_constant(&self, value: &Value) -> bool {
        match self {
            Cell::Blank => true,
            Cell::Text(text) => value.text().is_some_and(|t| t == text.as_str()),
            Cell::Const(Value::Nil) => value.is_nil(),
            Cell::Const(Value::Bool(b)) => value.text().is_some_and(|t| t == b.to_string()),
            Cell::Const(constant) => numeric(value).is_some_and(|n| n.loosely_eq(constant)),
            Cell::Pred(_) => false,
        }
    }

    /// Evaluate an output or `if:` cell against the row's record.
    pub(crate) fn output_value<R: Record + ?Sized>(&self, record: &R) -> Value {
        match self {
            Cell::Blank => Value::Nil,
            Cell::Text(text) => Value::String(text.clone()),
            Cell::Const(value) => value.clone(),
            Cell::Pred(Predicate::Symbol { name, .. }) => {
                record.field(name).cloned().unwrap_or(Value::Nil)
            }
            Cell::Pred(Predicate::Guard(guard)) => guard.eval(record),
            // other predicate kinds are never built for output cells
            Cell::Pred(_) => Value::Nil,
        }
    }

    pub(crate) fn kind(&self) -> Option<PredicateKind> {
        match self {
            Cell::Const(_) => Some(PredicateKind::Constant),
            Cell::Pred(p) => Some(p.kind()),
            Cell::Blank | Cell::Text(_) => None,
        }
    }
}

impl MatcherKind {
    fn try_match(self, cell: &str, ctx: &MatchContext<'_>) -> MatchResult {
        match self {
            MatcherKind::Range => range(cell),
            MatcherKind::Numeric => numeric_compare(cell),
            MatcherKind::Pattern => pattern(cell, ctx.regexp_implicit),
            MatcherKind::Constant => constant(cell),
            MatcherKind::Symbol => Ok(symbol(cell, false)),
            MatcherKind::Guard => guard(cell),
        }
    }
}

/// Compile an input column cell.
pub(crate) fn scan_input(cell: &str, ctx: &MatchContext<'_>) -> Result<Cell, Rejection> {
    if cell.is_empty() {
        return Ok(Cell::Blank);
    }
    for matcher in ctx.matchers {
        if let Some(compiled) = matcher.try_match(cell, ctx)? {
            return Ok(compiled);
        }
    }
    Ok(Cell::Text(cell.to_owned()))
}

/// Compile an output column cell: constants, field copies and guard
/// expressions; anything else is literal text.
pub(crate) fn scan_output(cell: &str, text_only: bool) -> Result<Cell, Rejection> {
    if cell.is_empty() {
        return Ok(Cell::Blank);
    }
    if text_only {
        return Ok(Cell::Text(cell.to_owned()));
    }
    if let Some(compiled) = constant(cell)?.or_else(|| symbol(cell, true)) {
        return Ok(compiled);
    }
    Ok(guard(cell)?.unwrap_or_else(|| Cell::Text(cell.to_owned())))
}

/// Compile a `guard:` column cell, which must be a guard expression.
pub(crate) fn scan_guard(cell: &str) -> Result<Cell, Rejection> {
    if cell.is_empty() {
        return Ok(Cell::Blank);
    }
    guard(cell)?.ok_or_else(|| "guard cells must have the form ':field <op> <operand>'".into())
}

/// Compile an `if:` column cell: a guard expression or a boolean constant.
/// A blank `if:` cell keeps the row.
pub(crate) fn scan_if(cell: &str) -> Result<Cell, Rejection> {
    if cell.is_empty() {
        return Ok(Cell::Const(Value::Bool(true)));
    }
    if let Some(compiled) = constant(cell)? {
        return Ok(compiled);
    }
    guard(cell)?.ok_or_else(|| "if cells must be a guard expression or a constant".into())
}

/// A numeric operand, or `None` for text. A number too wide for a decimal
/// is rejected rather than read as text.
fn numeric_operand(text: &str) -> Result<Option<Decimal>, Rejection> {
    match to_numeric(text) {
        Some(number) => Ok(number.as_decimal()),
        None if is_numeric_literal(text) => Err(too_wide(text)),
        None => Ok(None),
    }
}

fn too_wide(text: &str) -> Rejection {
    format!("number '{text}' has more digits than a decimal holds")
}

fn range(cell: &str) -> MatchResult {
    let Some(parts) = grammar::parse_range(cell) else {
        return Ok(None);
    };
    let bounds = match (numeric_operand(parts.min)?, numeric_operand(parts.max)?) {
        (Some(min), Some(max)) => Bounds::Numeric { min, max },
        (None, None) if is_alnum(parts.min) && is_alnum(parts.max) => Bounds::Text {
            min: parts.min.to_owned(),
            max: parts.max.to_owned(),
        },
        _ => return Ok(None),
    };
    Ok(Some(Cell::Pred(Predicate::Range(RangeTest {
        negate: parts.negate,
        exclusive: parts.exclusive,
        bounds,
    }))))
}

fn is_alnum(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphanumeric)
}

fn numeric_compare(cell: &str) -> MatchResult {
    let Some((op, operand)) = grammar::parse_numeric_compare(cell) else {
        return Ok(None);
    };
    Ok(numeric_operand(operand)?.map(|operand| Cell::Pred(Predicate::Compare { op, operand })))
}

fn pattern(cell: &str, implicit: bool) -> MatchResult {
    if let Some((op, text)) = grammar::parse_pattern(cell) {
        // `!=:field` belongs to the symbol matcher
        if text.is_empty() || text.starts_with(':') {
            return Ok(None);
        }
        let test = match op {
            PatternOp::NotEqual => PatternTest::NotEqual(text.to_owned()),
            PatternOp::Match => PatternTest::Match(compile_regex(text)?),
            PatternOp::NoMatch => PatternTest::NoMatch(compile_regex(text)?),
        };
        return Ok(Some(Cell::Pred(Predicate::Pattern(test))));
    }
    if implicit && looks_like_pattern(cell) {
        return Ok(anchored(cell)
            .ok()
            .map(|re| Cell::Pred(Predicate::Pattern(PatternTest::Match(re)))));
    }
    Ok(None)
}

fn looks_like_pattern(cell: &str) -> bool {
    !cell.starts_with([':', '=', '!', '<', '>'])
        && !is_numeric_literal(cell)
        && cell.chars().any(|c| !(c.is_alphanumeric() || c == '_'))
}

fn compile_regex(text: &str) -> Result<regex::Regex, Rejection> {
    anchored(text).map_err(|e| format!("invalid regular expression: {e}"))
}

fn constant(cell: &str) -> MatchResult {
    let value = match grammar::parse_constant(cell) {
        None => return Ok(None),
        Some(ConstantLit::Nil) => Value::Nil,
        Some(ConstantLit::Bool(b)) => Value::Bool(b),
        Some(ConstantLit::Number(text)) => to_numeric(text).ok_or_else(|| too_wide(text))?,
    };
    Ok(Some(Cell::Const(value)))
}

/// In output cells only the equality form is a field copy.
fn symbol(cell: &str, output: bool) -> Option<Cell> {
    let (op, name) = grammar::parse_symbol(cell)?;
    if output && op != CompareOp::Eq {
        return None;
    }
    Some(Cell::Pred(Predicate::Symbol {
        op,
        name: name.to_owned(),
    }))
}

fn guard(cell: &str) -> MatchResult {
    let Some(parts) = grammar::parse_guard(cell) else {
        return Ok(None);
    };
    let test = match parts.op {
        GuardOp::Call => GuardTest::Call(
            operation::Operation::lookup(parts.operand)
                .ok_or_else(|| format!("unknown operation '{}'", parts.operand))?,
        ),
        GuardOp::Regex { matches } => GuardTest::Regex {
            regex: compile_regex(parts.operand)?,
            matches,
        },
        GuardOp::Compare(op) => GuardTest::Compare {
            op,
            operand: numeric_operand(parts.operand)?
                .map_or_else(|| Operand::Text(parts.operand.to_owned()), Operand::Number),
        },
    };
    Ok(Some(Cell::Pred(Predicate::Guard(Guard {
        negate: parts.negate,
        name: parts.name.to_owned(),
        test,
    }))))
}

impl FromStr for MatcherKind {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MatcherKind::DEFAULT
            .into_iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown matcher '{s}'"))
    }
}
