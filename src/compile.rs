use tracing::debug;

use crate::index::Index;
use crate::matchers::{Cell, MatchContext};
use crate::scan::{scan_cell, CompiledRow, ScanRow};
use crate::{Columns, CompileError, DecisionTable, Options, Role};

pub(crate) fn compile<R, S>(
    rows: &[R],
    columns: Columns,
    options: Options,
) -> Result<DecisionTable, CompileError>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    options.validate()?;
    if rows.is_empty() {
        return Err(CompileError::EmptyTable);
    }

    let keys = key_columns(&columns, &options)?;
    let ctx = MatchContext {
        matchers: options.enabled_matchers(),
        regexp_implicit: options.is_regexp_implicit(),
    };

    let compiled = rows
        .iter()
        .enumerate()
        .map(|(i, row)| compile_row(i + 1, row.as_ref(), &columns, &keys, &ctx, &options))
        .collect::<Result<Vec<_>, _>>()?;

    let index = (!keys.is_empty()).then(|| Index::build(keys, &compiled));

    debug!(
        rows = compiled.len(),
        inputs = columns.positions(Role::Input).count(),
        outputs = columns.positions(Role::Output).count(),
        index_entries = index.as_ref().map_or(0, Index::len),
        first_match = options.is_first_match(),
        "compiled decision table"
    );

    Ok(DecisionTable {
        columns,
        rows: compiled,
        index,
        options,
    })
}

/// The first `index` input columns, if an index is configured.
fn key_columns(columns: &Columns, options: &Options) -> Result<Vec<usize>, CompileError> {
    let Some(width) = options.index_columns() else {
        return Ok(Vec::new());
    };
    let inputs: Vec<usize> = columns.positions(Role::Input).collect();
    if width > inputs.len() {
        return Err(CompileError::IndexTooWide {
            index: width,
            inputs: inputs.len(),
        });
    }
    Ok(inputs[..width].to_vec())
}

fn compile_row<S: AsRef<str>>(
    row_number: usize,
    cells: &[S],
    columns: &Columns,
    keys: &[usize],
    ctx: &MatchContext<'_>,
    options: &Options,
) -> Result<CompiledRow, CompileError> {
    if cells.len() != columns.len() {
        return Err(CompileError::RaggedRow {
            row: row_number,
            expected: columns.len(),
            found: cells.len(),
        });
    }

    let mut row = CompiledRow {
        cells: Vec::with_capacity(cells.len()),
        scan: ScanRow::default(),
    };
    for (i, (column, cell)) in columns.iter().zip(cells).enumerate() {
        let cell = cell.as_ref().trim();

        // key cells are settled by the index lookup and never rescanned
        if keys.contains(&i) {
            if cell.is_empty() {
                return Err(CompileError::EmptyIndexKey {
                    row: row_number,
                    column: i,
                });
            }
            row.cells.push(Cell::Text(cell.to_owned()));
            continue;
        }

        let (compiled, class) = scan_cell(column, cell, ctx, options.is_text_only()).map_err(
            |reason| CompileError::InvalidCell {
                row: row_number,
                column: i,
                cell: cell.to_owned(),
                reason,
            },
        )?;
        match class {
            Some(true) => row.scan.predicates.push(i),
            Some(false) => row.scan.constants.push(i),
            None => {}
        }
        row.cells.push(compiled);
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Columns {
        Columns::builder()
            .input("topic")
            .input("region")
            .output("team_member")
            .build()
            .unwrap()
    }

    #[test]
    fn compiles_rows_and_scan_sets() {
        let rows = [["sports", "Europe", "Alice"], ["", "> 5", "Bob"]];
        let table = compile(&rows, columns(), Options::new()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].scan.constants, vec![0, 1]);
        assert!(table.rows[0].scan.predicates.is_empty());
        assert!(table.rows[1].scan.constants.is_empty());
        assert_eq!(table.rows[1].scan.predicates, vec![1]);
        assert!(table.index.is_none());
    }

    #[test]
    fn empty_table_rejected() {
        let rows: [[&str; 3]; 0] = [];
        let err = compile(&rows, columns(), Options::new()).unwrap_err();
        assert_eq!(err, CompileError::EmptyTable);
    }

    #[test]
    fn ragged_row_rejected() {
        let rows = vec![vec!["a", "b", "c"], vec!["a", "b"]];
        let err = compile(&rows, columns(), Options::new()).unwrap_err();
        assert_eq!(
            err,
            CompileError::RaggedRow {
                row: 2,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn bad_cell_names_row_and_column() {
        let rows = [["x", "=~ (", "y"]];
        match compile(&rows, columns(), Options::new()) {
            Err(CompileError::InvalidCell {
                row, column, cell, ..
            }) => {
                assert_eq!((row, column), (1, 1));
                assert_eq!(cell, "=~ (");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn index_too_wide() {
        let rows = [["a", "b", "c"]];
        let err = compile(&rows, columns(), Options::new().index(3)).unwrap_err();
        assert_eq!(err, CompileError::IndexTooWide { index: 3, inputs: 2 });
    }

    #[test]
    fn zero_index_rejected() {
        let rows = [["a", "b", "c"]];
        let err = compile(&rows, columns(), Options::new().index(0)).unwrap_err();
        assert!(matches!(err, CompileError::InvalidOption { .. }));
    }

    #[test]
    fn empty_key_cell_rejected() {
        let rows = [["a", "b", "c"], ["", "b", "c"]];
        let err = compile(&rows, columns(), Options::new().index(1)).unwrap_err();
        assert_eq!(err, CompileError::EmptyIndexKey { row: 2, column: 0 });
    }

    #[test]
    fn key_columns_leave_the_scan_set() {
        let rows = [["1..5", "Europe", "x"], ["1..5", ">3", "y"]];
        let table = compile(&rows, columns(), Options::new().index(1)).unwrap();
        assert_eq!(table.rows[0].scan.constants, vec![1]);
        assert_eq!(table.rows[1].scan.predicates, vec![1]);
        // key cells stay literal text
        assert!(matches!(&table.rows[0].cells[0], Cell::Text(t) if t == "1..5"));
        assert_eq!(table.index.as_ref().map(Index::len), Some(1));
    }

    #[test]
    fn text_only_table_keeps_literals() {
        let rows = [[">5", "1..3", ":= nil"]];
        let table = compile(&rows, columns(), Options::new().text_only(true)).unwrap();
        assert_eq!(table.rows[0].scan.constants, vec![0, 1]);
        assert!(matches!(&table.rows[0].cells[2], Cell::Text(t) if t == ":= nil"));
    }
}
