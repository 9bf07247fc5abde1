use std::cmp::Ordering;

use regex::Regex;
use rust_decimal::Decimal;

use super::operation::Operation;
use crate::numeric::numeric_decimal;
use crate::types::Record;
use crate::{CompareOp, Value};

/// Broad category of a compiled predicate, as seen by the row scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKind {
    /// A decoded literal; compared by equality, never called.
    Constant,
    /// Tests the current column's value on its own.
    Comparator,
    /// Tests a named field of the whole record.
    Guard,
    /// Compares the current column's value with another named field.
    SymbolRef,
}

/// A compiled cell expression. Immutable once built.
#[derive(Debug, Clone)]
pub(crate) enum Predicate {
    Compare { op: CompareOp, operand: Decimal },
    Range(RangeTest),
    Pattern(PatternTest),
    Symbol { op: CompareOp, name: String },
    Guard(Guard),
}

#[derive(Debug, Clone)]
pub(crate) struct RangeTest {
    pub negate: bool,
    pub exclusive: bool,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Bounds {
    Numeric { min: Decimal, max: Decimal },
    Text { min: String, max: String },
}

#[derive(Debug, Clone)]
pub(crate) enum PatternTest {
    Match(Regex),
    NoMatch(Regex),
    NotEqual(String),
}

/// `[!]:name <op> <operand>`: evaluated against the whole record.
#[derive(Debug, Clone)]
pub(crate) struct Guard {
    pub negate: bool,
    pub name: String,
    pub test: GuardTest,
}

#[derive(Debug, Clone)]
pub(crate) enum GuardTest {
    Call(Operation),
    Compare { op: CompareOp, operand: Operand },
    Regex { regex: Regex, matches: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    Number(Decimal),
    Text(String),
}

impl Predicate {
    pub(crate) fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Compare { .. } | Predicate::Range(_) | Predicate::Pattern(_) => {
                PredicateKind::Comparator
            }
            Predicate::Symbol { .. } => PredicateKind::SymbolRef,
            Predicate::Guard(_) => PredicateKind::Guard,
        }
    }

    /// Test a column value (and, for guard and symbol kinds, the record it
    /// came from). Never fails: data of the wrong shape is a non-match.
    pub(crate) fn matches<R: Record + ?Sized>(&self, value: &Value, record: &R) -> bool {
        match self {
            Predicate::Compare { op, operand } => {
                numeric_decimal(value).is_some_and(|n| op.holds(n.cmp(operand)))
            }
            Predicate::Range(range) => range.contains(value),
            Predicate::Pattern(pattern) => pattern.matches(value),
            Predicate::Symbol { op, name } => {
                let other = record.field(name).unwrap_or(&Value::Nil);
                value.compare(*op, other).unwrap_or(false)
            }
            Predicate::Guard(guard) => guard.eval(record).is_truthy(),
        }
    }
}

impl RangeTest {
    pub(crate) fn contains(&self, value: &Value) -> bool {
        let within = match &self.bounds {
            Bounds::Numeric { min, max } => {
                numeric_decimal(value).is_some_and(|n| self.within(&n, min, max))
            }
            Bounds::Text { min, max } => value
                .as_str()
                .is_some_and(|s| self.within(s, min.as_str(), max.as_str())),
        };
        within != self.negate
    }

    fn within<T: Ord + ?Sized>(&self, v: &T, min: &T, max: &T) -> bool {
        v >= min
            && match v.cmp(max) {
                Ordering::Less => true,
                Ordering::Equal => !self.exclusive,
                Ordering::Greater => false,
            }
    }
}

impl PatternTest {
    fn matches(&self, value: &Value) -> bool {
        match self {
            PatternTest::Match(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            PatternTest::NoMatch(re) => value.as_str().is_some_and(|s| !re.is_match(s)),
            PatternTest::NotEqual(text) => value.text().is_none_or(|t| t != text.as_str()),
        }
    }
}

impl Guard {
    /// Evaluate to a value: a boolean for tests, the operation's result for
    /// `.` calls.
    pub(crate) fn eval<R: Record + ?Sized>(&self, record: &R) -> Value {
        let value = record.field(&self.name).unwrap_or(&Value::Nil);
        let result = match &self.test {
            GuardTest::Call(operation) => operation.apply(value),
            GuardTest::Compare { op, operand } => Value::Bool(compare_operand(value, *op, operand)),
            GuardTest::Regex { regex, matches } => {
                Value::Bool(value.as_str().is_some_and(|s| regex.is_match(s) == *matches))
            }
        };
        if self.negate {
            Value::Bool(!result.is_truthy())
        } else {
            result
        }
    }
}

fn compare_operand(value: &Value, op: CompareOp, operand: &Operand) -> bool {
    match operand {
        Operand::Number(n) => numeric_decimal(value).is_some_and(|v| op.holds(v.cmp(n))),
        Operand::Text(text) => match op {
            CompareOp::Eq => value.text().is_some_and(|t| t == text.as_str()),
            CompareOp::Neq => value.text().is_none_or(|t| t != text.as_str()),
            _ => value
                .as_str()
                .is_some_and(|s| op.holds(s.cmp(text.as_str()))),
        },
    }
}

/// Anchor a user pattern so it must match the whole value.
pub(crate) fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}
