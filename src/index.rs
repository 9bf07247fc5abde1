//! Key-column index over a compiled table.
//!
//! Maps each distinct key (one cell, or a tuple of cells for multi-column
//! keys) to the rows carrying it. Rows are recorded in ascending order and
//! consecutive rows collapse into inclusive `(start, end)` ranges, so an
//! entry's size tracks the number of contiguous runs rather than rows.

use std::collections::HashMap;

use crate::matchers::Cell;
use crate::scan::CompiledRow;
use crate::Value;

/// The rows sharing one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSpan {
    /// A key that occurs on exactly one row.
    Row(usize),
    /// Sorted, non-overlapping, non-adjacent inclusive row ranges.
    Ranges(Vec<(usize, usize)>),
}

impl RowSpan {
    fn push(&mut self, row: usize) {
        match self {
            RowSpan::Row(prev) => {
                let prev = *prev;
                *self = if prev + 1 == row {
                    RowSpan::Ranges(vec![(prev, row)])
                } else {
                    RowSpan::Ranges(vec![(prev, prev), (row, row)])
                };
            }
            RowSpan::Ranges(ranges) => match ranges.last_mut() {
                Some((_, end)) if *end + 1 == row => *end = row,
                _ => ranges.push((row, row)),
            },
        }
    }

    /// Every row in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        let (single, ranges): (Option<usize>, &[(usize, usize)]) = match self {
            RowSpan::Row(row) => (Some(*row), &[]),
            RowSpan::Ranges(ranges) => (None, ranges),
        };
        single
            .into_iter()
            .chain(ranges.iter().flat_map(|&(start, end)| start..=end))
    }
}

#[derive(Debug, Clone)]
enum Entries {
    Single(HashMap<String, RowSpan>),
    Tuple(HashMap<Vec<String>, RowSpan>),
}

/// Immutable index from key-column values to row spans.
#[derive(Debug, Clone)]
pub struct Index {
    columns: Vec<usize>,
    entries: Entries,
}

impl Index {
    /// Build over `rows`, keyed on `columns` (whose cells must all be text).
    pub(crate) fn build(columns: Vec<usize>, rows: &[CompiledRow]) -> Self {
        let entries = if let [col] = columns[..] {
            let mut map: HashMap<String, RowSpan> = HashMap::new();
            for (i, row) in rows.iter().enumerate() {
                let key = key_text(&row.cells[col]);
                match map.get_mut(key) {
                    Some(span) => span.push(i),
                    None => {
                        map.insert(key.to_owned(), RowSpan::Row(i));
                    }
                }
            }
            Entries::Single(map)
        } else {
            let mut map: HashMap<Vec<String>, RowSpan> = HashMap::new();
            for (i, row) in rows.iter().enumerate() {
                let key: Vec<String> = columns
                    .iter()
                    .map(|&col| key_text(&row.cells[col]).to_owned())
                    .collect();
                match map.get_mut(&key) {
                    Some(span) => span.push(i),
                    None => {
                        map.insert(key, RowSpan::Row(i));
                    }
                }
            }
            Entries::Tuple(map)
        };
        Self { columns, entries }
    }

    /// Candidate rows for an input, given its per-column scan values.
    /// `None` when the key is absent (including a nil key value).
    pub(crate) fn lookup(&self, scan: &[&Value]) -> Option<&RowSpan> {
        match &self.entries {
            Entries::Single(map) => map.get(scan[self.columns[0]].text()?.as_ref()),
            Entries::Tuple(map) => {
                let key = self
                    .columns
                    .iter()
                    .map(|&col| scan[col].text().map(|t| t.into_owned()))
                    .collect::<Option<Vec<String>>>()?;
                map.get(&key)
            }
        }
    }

    /// Key column positions.
    #[must_use]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.entries {
            Entries::Single(map) => map.len(),
            Entries::Tuple(map) => map.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a key by its cell texts, one per key column.
    #[must_use]
    pub fn get<S: AsRef<str>>(&self, key: &[S]) -> Option<&RowSpan> {
        match &self.entries {
            Entries::Single(map) => match key {
                [single] => map.get(single.as_ref()),
                _ => None,
            },
            Entries::Tuple(map) => {
                let key: Vec<String> = key.iter().map(|k| k.as_ref().to_owned()).collect();
                map.get(&key)
            }
        }
    }
}

fn key_text(cell: &Cell) -> &str {
    match cell {
        Cell::Text(text) => text,
        // key columns are compiled as text and blank keys are rejected
        _ => "",
    }
}
