use std::collections::HashSet;
use std::fmt;

use super::error::CompileError;

/// The part a column plays in a decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Matched against the input field of the same name.
    Input,
    /// Produces a named result value.
    Output,
    /// Anonymous boolean test over the whole input record.
    Guard,
    /// Anonymous boolean filter evaluated after a row matches.
    If,
}

/// One entry of the column dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: Option<String>,
    role: Role,
    text_only: bool,
}

impl Column {
    #[must_use]
    pub fn input(name: &str) -> Self {
        Self::named(Role::Input, name)
    }

    #[must_use]
    pub fn output(name: &str) -> Self {
        Self::named(Role::Output, name)
    }

    #[must_use]
    pub fn guard() -> Self {
        Self {
            name: None,
            role: Role::Guard,
            text_only: false,
        }
    }

    #[must_use]
    pub fn if_column() -> Self {
        Self {
            name: None,
            role: Role::If,
            text_only: false,
        }
    }

    /// Mark the column's cells as plain text: no expression is recognized.
    #[must_use]
    pub fn text_only(mut self) -> Self {
        self.text_only = true;
        self
    }

    fn named(role: Role, name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            role,
            text_only: false,
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn is_text_only(&self) -> bool {
        self.text_only
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            Role::Input => "in",
            Role::Output => "out",
            Role::Guard => "guard",
            Role::If => "if",
        };
        let text = if self.text_only { "/text" } else { "" };
        match &self.name {
            Some(name) => write!(f, "{role}{text} :{name}"),
            None => write!(f, "{role}:"),
        }
    }
}

/// Immutable column dictionary, indexed by column position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    columns: Vec<Column>,
}

/// Folds column entries into a validated [`Columns`] dictionary.
#[derive(Debug, Default)]
pub struct ColumnsBuilder {
    columns: Vec<Column>,
}

impl ColumnsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn input(self, name: &str) -> Self {
        self.column(Column::input(name))
    }

    #[must_use]
    pub fn output(self, name: &str) -> Self {
        self.column(Column::output(name))
    }

    #[must_use]
    pub fn guard(self) -> Self {
        self.column(Column::guard())
    }

    #[must_use]
    pub fn if_column(self) -> Self {
        self.column(Column::if_column())
    }

    /// Validate and freeze the dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when there is no input/guard column, no output
    /// column, a duplicated output name, or an output named like an input.
    pub fn build(self) -> Result<Columns, CompileError> {
        let inputs: HashSet<&str> = self
            .columns
            .iter()
            .filter(|c| c.role == Role::Input)
            .filter_map(Column::name)
            .collect();

        if !self
            .columns
            .iter()
            .any(|c| matches!(c.role, Role::Input | Role::Guard))
        {
            return Err(CompileError::NoInputColumns);
        }

        let mut outputs = HashSet::new();
        for name in self
            .columns
            .iter()
            .filter(|c| c.role == Role::Output)
            .filter_map(Column::name)
        {
            if !outputs.insert(name) {
                return Err(CompileError::DuplicateOutput {
                    name: name.to_owned(),
                });
            }
            if inputs.contains(name) {
                return Err(CompileError::OutputShadowsInput {
                    name: name.to_owned(),
                });
            }
        }
        if outputs.is_empty() {
            return Err(CompileError::NoOutputColumns);
        }

        Ok(Columns {
            columns: self.columns,
        })
    }
}

impl Columns {
    #[must_use]
    pub fn builder() -> ColumnsBuilder {
        ColumnsBuilder::new()
    }

    /// Parse a header row into a dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidHeader`] for a malformed cell, or any
    /// validation error from [`ColumnsBuilder::build`].
    pub fn from_header<S: AsRef<str>>(cells: &[S]) -> Result<Self, CompileError> {
        Self::from_cells(cells.iter().map(AsRef::as_ref).enumerate())
    }

    /// Fold `(position, header cell)` pairs; positions only label errors.
    pub(crate) fn from_cells<'a>(
        cells: impl IntoIterator<Item = (usize, &'a str)>,
    ) -> Result<Self, CompileError> {
        cells
            .into_iter()
            .try_fold(ColumnsBuilder::new(), |builder, (i, cell)| {
                let column = crate::parse::parse_header_cell(i, cell)?;
                Ok::<_, CompileError>(builder.column(column))
            })?
            .build()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Positions of columns with the given role, in column order.
    pub fn positions(&self, role: Role) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.role == role)
            .map(|(i, _)| i)
    }
}
