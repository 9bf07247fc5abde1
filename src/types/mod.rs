mod column;
mod compare;
mod decision;
mod error;
mod input;
mod options;
mod report;
mod table;
mod value;

pub use column::{Column, Columns, ColumnsBuilder, Role};
pub use compare::CompareOp;
pub use decision::Decision;
pub use error::{CompileError, DecideError};
pub use input::Input;
pub(crate) use input::Record;
pub use options::{MatcherKind, Options};
pub use report::DecisionReport;
pub use table::{DecisionTable, TableBuilder};
pub use value::Value;
