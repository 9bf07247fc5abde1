mod compile;
mod error;
mod evaluate;
mod index;
mod matchers;
mod numeric;
mod result;
mod scan;
mod types;

pub mod parse;

pub use error::DectableError;
pub use index::{Index, RowSpan};
pub use matchers::PredicateKind;
pub use numeric::{numeric, to_numeric};
pub use parse::ParseError;
pub use types::{
    Column, Columns, ColumnsBuilder, CompareOp, CompileError, DecideError, Decision,
    DecisionReport, DecisionTable, Input, MatcherKind, Options, Role, TableBuilder, Value,
};
