use std::time::Instant;

use tracing::{debug, trace};

use crate::result::{Accumulator, Flow};
use crate::{DecideError, Decision, DecisionReport, DecisionTable, Input, Role, Value};

static NIL: Value = Value::Nil;

/// Sees every candidate row as it is tested.
trait Observer {
    fn visit(&mut self, row: usize, matched: bool);
}

impl Observer for () {
    fn visit(&mut self, _row: usize, _matched: bool) {}
}

#[derive(Default)]
struct Stats {
    scanned: Vec<usize>,
    matched: Vec<usize>,
}

impl Observer for Stats {
    fn visit(&mut self, row: usize, matched: bool) {
        self.scanned.push(row);
        if matched {
            self.matched.push(row);
        }
    }
}

pub(crate) fn decide(table: &DecisionTable, input: &Input) -> Result<Decision, DecideError> {
    run(table, input, true, &mut ()).map(|(decision, _)| decision)
}

pub(crate) fn decide_unindexed(
    table: &DecisionTable,
    input: &Input,
) -> Result<Decision, DecideError> {
    run(table, input, false, &mut ()).map(|(decision, _)| decision)
}

pub(crate) fn decide_detailed(
    table: &DecisionTable,
    input: &Input,
) -> Result<DecisionReport, DecideError> {
    let start = Instant::now();
    let mut stats = Stats::default();
    let (decision, indexed) = run(table, input, true, &mut stats)?;
    Ok(DecisionReport::new(
        decision,
        stats.scanned,
        stats.matched,
        indexed,
        start.elapsed(),
    ))
}

/// Returns the decision and whether the index was consulted.
fn run<O: Observer>(
    table: &DecisionTable,
    input: &Input,
    use_index: bool,
    observer: &mut O,
) -> Result<(Decision, bool), DecideError> {
    if input.is_empty() {
        return Err(DecideError::EmptyInput);
    }

    // the input's value for every column, nil where none applies
    let scan: Vec<&Value> = table
        .columns
        .iter()
        .map(|column| match (column.role(), column.name()) {
            (Role::Input, Some(name)) => input.get(name).unwrap_or(&NIL),
            _ => &NIL,
        })
        .collect();

    let mut acc = Accumulator::new(table, input);
    let indexed = match table.index.as_ref() {
        Some(index) if use_index => {
            match index.lookup(&scan) {
                Some(span) => scan_rows(table, span.rows(), &scan, &[], input, &mut acc, observer),
                None => debug!("index lookup found no candidate rows"),
            }
            true
        }
        // a full scan must recheck the key cells the index would have settled
        Some(index) => {
            let rows = 0..table.rows.len();
            scan_rows(table, rows, &scan, index.columns(), input, &mut acc, observer);
            false
        }
        None => {
            let rows = 0..table.rows.len();
            scan_rows(table, rows, &scan, &[], input, &mut acc, observer);
            false
        }
    };
    Ok((acc.finish(), indexed))
}

fn scan_rows<O: Observer>(
    table: &DecisionTable,
    rows: impl Iterator<Item = usize>,
    scan: &[&Value],
    keys: &[usize],
    input: &Input,
    acc: &mut Accumulator<'_>,
    observer: &mut O,
) {
    for row in rows {
        let compiled = &table.rows[row];
        let matched = keys
            .iter()
            .all(|&col| compiled.cells[col].matches_constant(scan[col]))
            && compiled.matches(scan, input);
        observer.visit(row, matched);
        if !matched {
            continue;
        }
        trace!(row, "row matched");
        if acc.add(row) == Flow::Stop {
            break;
        }
    }
}
