use rust_decimal::Decimal;

use crate::numeric::numeric_decimal;
use crate::Value;

/// Named unary operations available to guard cells as `:field.<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Present,
    Blank,
    Nil,
    Empty,
    Length,
    Upcase,
    Downcase,
    Zero,
    Positive,
    Negative,
    Even,
    Odd,
    ToS,
}

const REGISTRY: &[(&str, Operation)] = &[
    ("present", Operation::Present),
    ("blank", Operation::Blank),
    ("absent", Operation::Blank),
    ("nil", Operation::Nil),
    ("empty", Operation::Empty),
    ("length", Operation::Length),
    ("size", Operation::Length),
    ("upcase", Operation::Upcase),
    ("downcase", Operation::Downcase),
    ("zero", Operation::Zero),
    ("positive", Operation::Positive),
    ("negative", Operation::Negative),
    ("even", Operation::Even),
    ("odd", Operation::Odd),
    ("to_s", Operation::ToS),
];

impl Operation {
    /// Resolve an operation name; a trailing `?` is ignored.
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let name = name.strip_suffix('?').unwrap_or(name);
        REGISTRY
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, op)| *op)
    }

    /// Apply the operation. Values of the wrong category yield `Nil`.
    pub(crate) fn apply(self, value: &Value) -> Value {
        match self {
            Operation::Present => Value::Bool(!is_blank(value)),
            Operation::Blank => Value::Bool(is_blank(value)),
            Operation::Nil => Value::Bool(value.is_nil()),
            Operation::Empty => match value {
                Value::String(s) => Value::Bool(s.is_empty()),
                Value::List(items) => Value::Bool(items.is_empty()),
                _ => Value::Nil,
            },
            Operation::Length => match value {
                Value::String(s) => length(s.chars().count()),
                Value::List(items) => length(items.len()),
                _ => Value::Nil,
            },
            Operation::Upcase => map_str(value, str::to_uppercase),
            Operation::Downcase => map_str(value, str::to_lowercase),
            Operation::Zero => test_number(value, |n| n.is_zero()),
            Operation::Positive => test_number(value, |n| n > Decimal::ZERO),
            Operation::Negative => test_number(value, |n| n < Decimal::ZERO),
            Operation::Even => test_int(value, |n| n % 2 == 0),
            Operation::Odd => test_int(value, |n| n % 2 != 0),
            Operation::ToS => value
                .text()
                .map_or(Value::Nil, |text| Value::String(text.into_owned())),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::String(s) => s.trim().is_empty(),
        Value::List(items) => items.is_empty(),
        _ => false,
    }
}

fn length(n: usize) -> Value {
    i64::try_from(n).map_or(Value::Nil, Value::Int)
}

fn map_str(value: &Value, f: impl Fn(&str) -> String) -> Value {
    value.as_str().map_or(Value::Nil, |s| Value::String(f(s)))
}

fn test_number(value: &Value, f: impl Fn(Decimal) -> bool) -> Value {
    numeric_decimal(value).map_or(Value::Nil, |n| Value::Bool(f(n)))
}

fn test_int(value: &Value, f: impl Fn(i64) -> bool) -> Value {
    match crate::numeric::numeric(value) {
        Some(Value::Int(n)) => Value::Bool(f(n)),
        _ => Value::Nil,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_question_mark() {
        assert_eq!(Operation::lookup("present?"), Some(Operation::Present));
        assert_eq!(Operation::lookup("size"), Some(Operation::Length));
        assert_eq!(Operation::lookup("absent"), Some(Operation::Blank));
        assert_eq!(Operation::lookup("explode"), None);
    }

    #[test]
    fn presence() {
        assert_eq!(Operation::Present.apply(&Value::from("x")), Value::Bool(true));
        assert_eq!(Operation::Present.apply(&Value::from("  ")), Value::Bool(false));
        assert_eq!(Operation::Present.apply(&Value::Nil), Value::Bool(false));
        assert_eq!(Operation::Blank.apply(&Value::Nil), Value::Bool(true));
        assert_eq!(Operation::Present.apply(&Value::Int(0)), Value::Bool(true));
    }

    #[test]
    fn length_counts_chars() {
        assert_eq!(Operation::Length.apply(&Value::from("037833100")), Value::Int(9));
        assert_eq!(Operation::Length.apply(&Value::from("héllo")), Value::Int(5));
        assert_eq!(Operation::Length.apply(&Value::Int(5)), Value::Nil);
    }

    #[test]
    fn string_case() {
        assert_eq!(Operation::Upcase.apply(&Value::from("ab")), Value::from("AB"));
        assert_eq!(Operation::Downcase.apply(&Value::from("AB")), Value::from("ab"));
        assert_eq!(Operation::Upcase.apply(&Value::Nil), Value::Nil);
    }

    #[test]
    fn numeric_predicates_coerce_strings() {
        assert_eq!(Operation::Zero.apply(&Value::from("0.0")), Value::Bool(true));
        assert_eq!(Operation::Positive.apply(&Value::Int(3)), Value::Bool(true));
        assert_eq!(Operation::Negative.apply(&Value::from("-1")), Value::Bool(true));
        assert_eq!(Operation::Even.apply(&Value::from("4")), Value::Bool(true));
        assert_eq!(Operation::Odd.apply(&Value::Int(4)), Value::Bool(false));
        assert_eq!(Operation::Zero.apply(&Value::from("zero")), Value::Nil);
    }

    #[test]
    fn to_s() {
        assert_eq!(Operation::ToS.apply(&Value::Int(12)), Value::from("12"));
        assert_eq!(Operation::ToS.apply(&Value::Nil), Value::Nil);
    }
}
