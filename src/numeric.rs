//! String-to-number coercion shared by every numeric-aware cell.
//!
//! The grammar is `[sign]digits[.digits]`; no exponents. Anything with a
//! decimal point (even an empty fraction, as in `5.`) becomes a
//! [`Value::Decimal`], everything else a [`Value::Int`]. Text that does not
//! fit the grammar is simply "not numeric".
//!
//! Decimals hold a 96-bit mantissa, 28 or 29 significant digits. A literal that fits the
//! grammar but not a [`Decimal`] is never rounded: it is not numeric as an
//! input value, and table cells carrying one are rejected at compile time.

use rust_decimal::Decimal;
use winnow::ascii::{digit0, digit1};
use winnow::combinator::opt;
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::one_of;

use crate::Value;

pub(crate) fn numeric_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (opt(one_of(['+', '-'])), digit1, opt(('.', digit0)))
        .take()
        .parse_next(input)
}

/// Parse `text` as an integer or decimal.
#[must_use]
pub fn to_numeric(text: &str) -> Option<Value> {
    let literal = numeric_literal.parse(text).ok()?;
    let unsigned = literal.strip_prefix('+').unwrap_or(literal);
    if unsigned.contains('.') {
        return parse_decimal(unsigned).map(Value::Decimal);
    }
    match unsigned.parse::<i64>() {
        Ok(v) => Some(Value::Int(v)),
        // wider than i64: keep it as a decimal rather than reject it
        Err(_) => parse_decimal(unsigned).map(Value::Decimal),
    }
}

/// Coerce a value to a number: numbers pass through, strings go through
/// [`to_numeric`], anything else is not numeric.
#[must_use]
pub fn numeric(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) | Value::Decimal(_) => Some(value.clone()),
        Value::String(text) => to_numeric(text),
        _ => None,
    }
}

/// Whether `text` fits the numeric grammar, representable or not.
pub(crate) fn is_numeric_literal(text: &str) -> bool {
    numeric_literal.parse(text).is_ok()
}

/// [`numeric`], widened to a decimal for comparisons.
pub(crate) fn numeric_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Int(_) | Value::Decimal(_) => value.as_decimal(),
        Value::String(text) => to_numeric(text)?.as_decimal(),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str_exact(text.strip_suffix('.').unwrap_or(text)).ok()
}
