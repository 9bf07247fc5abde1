//! Per-call result accumulation.
//!
//! Output and `if:` cells of a matched row are evaluated left to right
//! against the input overlaid with the outputs already computed for that row.
//! In first-match mode the first row whose `if:` cells all hold stops the
//! scan. In accumulate mode every matched row is kept, rows failing an `if:`
//! are dropped afterwards in lock-step across all outputs, and a single
//! surviving row collapses back to scalars.

use crate::types::Record;
use crate::{Decision, DecisionTable, Input, Role, Value};

/// Whether the scan should go on after a row was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

/// The input record seen through one row's computed outputs.
struct RowScope<'a> {
    input: &'a Input,
    computed: &'a [(&'a str, Value)],
}

impl Record for RowScope<'_> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.computed
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
            .or_else(|| self.input.get(name))
    }
}

struct RowResult {
    values: Vec<Value>,
    survives: bool,
}

pub(crate) struct Accumulator<'t> {
    table: &'t DecisionTable,
    input: &'t Input,
    /// `(position, name)` of every output column.
    outputs: Vec<(usize, &'t str)>,
    rows: Vec<RowResult>,
}

impl<'t> Accumulator<'t> {
    pub(crate) fn new(table: &'t DecisionTable, input: &'t Input) -> Self {
        let outputs = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.role() == Role::Output)
            .filter_map(|(i, c)| c.name().map(|name| (i, name)))
            .collect();
        Self {
            table,
            input,
            outputs,
            rows: Vec::new(),
        }
    }

    /// Record a matched row.
    pub(crate) fn add(&mut self, row: usize) -> Flow {
        let result = self.evaluate(row);
        let first_match = self.table.options.is_first_match();
        if first_match && !result.survives {
            return Flow::Continue;
        }
        self.rows.push(result);
        if first_match {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn evaluate(&self, row: usize) -> RowResult {
        let cells = &self.table.rows[row].cells;
        let mut computed: Vec<(&str, Value)> = Vec::with_capacity(self.outputs.len());
        let mut survives = true;
        for (i, column) in self.table.columns.iter().enumerate() {
            let role = column.role();
            if !matches!(role, Role::Output | Role::If) {
                continue;
            }
            let value = cells[i].output_value(&RowScope {
                input: self.input,
                computed: &computed,
            });
            match (role, column.name()) {
                (Role::Output, Some(name)) => computed.push((name, value)),
                _ => survives &= value.is_truthy(),
            }
        }
        RowResult {
            values: computed.into_iter().map(|(_, v)| v).collect(),
            survives,
        }
    }

    pub(crate) fn finish(mut self) -> Decision {
        let mut survivors: Vec<Vec<Value>> = std::mem::take(&mut self.rows)
            .into_iter()
            .filter(|row| row.survives)
            .map(|row| row.values)
            .collect();

        match survivors.len() {
            0 => Decision::empty(),
            1 => {
                let values = survivors.pop().unwrap_or_default();
                Decision::new(self.named(values), false)
            }
            _ => {
                let mut lists: Vec<Vec<Value>> = vec![Vec::new(); self.outputs.len()];
                for row in survivors {
                    for (list, value) in lists.iter_mut().zip(row) {
                        list.push(value);
                    }
                }
                let values = lists.into_iter().map(Value::List).collect();
                Decision::new(self.named(values), true)
            }
        }
    }

    fn named(&self, values: Vec<Value>) -> Vec<(String, Value)> {
        self.outputs
            .iter()
            .zip(values)
            .map(|((_, name), value)| ((*name).to_owned(), value))
            .collect()
    }
}
