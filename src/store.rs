//! Owned dataset with change classification and capacity enforcement.
//!
//! The store wraps the raw rows and classifies every mutation as either a
//! structural change (length/shape) or a value change (single in-range
//! scalar), so the viewport controller knows whether to re-derive the
//! scroll extent or just re-render. It also enforces the maximum
//! addressable row/column counts derived from the platform scroll-range
//! limit, truncating (with a warning) rather than failing.

use crate::log;
use crate::value::CellValue;

/// One logical row: a scalar in list mode, a run of cells in grid mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// 1-D mode: the row is a single value.
    Scalar(CellValue),
    /// 2-D mode: the row is an ordered run of values.
    Cells(Vec<CellValue>),
}

impl Row {
    /// The value at `col`, or `Null` when absent (ragged or scalar rows).
    #[must_use]
    pub fn cell(&self, col: usize) -> CellValue {
        match self {
            Row::Scalar(v) => {
                if col == 0 {
                    v.clone()
                } else {
                    CellValue::Null
                }
            }
            Row::Cells(cells) => cells.get(col).cloned().unwrap_or(CellValue::Null),
        }
    }

    /// Number of cells in this row (1 for scalars).
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Row::Scalar(_) => 1,
            Row::Cells(cells) => cells.len(),
        }
    }
}

impl From<CellValue> for Row {
    fn from(v: CellValue) -> Self {
        Row::Scalar(v)
    }
}

impl From<Vec<CellValue>> for Row {
    fn from(cells: Vec<CellValue>) -> Self {
        Row::Cells(cells)
    }
}

/// Classification of a completed mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing observable happened (out-of-range write, identical value).
    None,
    /// A single in-range scalar changed; only its cell needs re-rendering.
    Value {
        /// Affected row index.
        row: usize,
        /// Affected column index (grid mode).
        col: Option<usize>,
    },
    /// Length or shape changed; scroll extent and pool clamp must be
    /// re-derived.
    Structural,
}

/// The dataset, plus the capacity limits it is clamped to.
pub struct DataStore {
    rows: Vec<Row>,
    max_rows: usize,
    max_cols: Option<usize>,
    truncation_count: u32,
}

impl DataStore {
    /// Wrap `rows`, truncating immediately if they exceed `max_rows`.
    #[must_use]
    pub fn new(rows: Vec<Row>, max_rows: usize, max_cols: Option<usize>) -> Self {
        let mut store = DataStore {
            rows,
            max_rows,
            max_cols,
            truncation_count: 0,
        };
        store.enforce_limits();
        store
    }

    /// Number of rows currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the store holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Uniform column count, defined as the width of the first row.
    ///
    /// An empty store has zero columns. Ragged rows are read through
    /// [`Self::get_cell`], which yields `Null` beyond a row's actual width.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Row::width)
    }

    /// Maximum addressable row count this store is clamped to.
    #[must_use]
    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// How many mutations have triggered a truncation warning so far.
    #[must_use]
    pub fn truncation_count(&self) -> u32 {
        self.truncation_count
    }

    /// The row at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// The scalar at `row` in list mode; `Null` when the row is absent.
    #[must_use]
    pub fn value(&self, row: usize) -> CellValue {
        self.rows.get(row).map_or(CellValue::Null, |r| r.cell(0))
    }

    /// The scalar at `(row, col)`; `Null` when either is out of range.
    #[must_use]
    pub fn get_cell(&self, row: usize, col: usize) -> CellValue {
        self.rows.get(row).map_or(CellValue::Null, |r| r.cell(col))
    }

    /// Write a whole row at `index`.
    ///
    /// Writing past the current end extends the dataset (padding the gap
    /// with `Null` scalars) and is therefore structural; an in-range write
    /// of a scalar row is a value change. Writes landing beyond `max_rows`
    /// are dropped with a truncation warning.
    pub fn set(&mut self, index: usize, row: Row) -> Change {
        if index >= self.max_rows {
            self.warn_truncated(index + 1);
            return Change::None;
        }
        let row = self.clamp_row(row);
        if index < self.rows.len() {
            let shape_changed = match (&row, self.rows.get(index)) {
                (Row::Scalar(_), Some(Row::Scalar(_))) => false,
                (Row::Cells(new), Some(Row::Cells(old))) => new.len() != old.len(),
                _ => true,
            };
            if let Some(slot) = self.rows.get_mut(index) {
                *slot = row;
            }
            if shape_changed {
                Change::Structural
            } else {
                Change::Value {
                    row: index,
                    col: None,
                }
            }
        } else {
            self.rows
                .resize(index + 1, Row::Scalar(CellValue::Null));
            if let Some(slot) = self.rows.get_mut(index) {
                *slot = row;
            }
            Change::Structural
        }
    }

    /// Write the scalar at `row` in list mode. See [`Self::set`].
    pub fn set_value(&mut self, row: usize, value: CellValue) -> Change {
        self.set(row, Row::Scalar(value))
    }

    /// Write a single cell at `(row, col)`.
    ///
    /// Only in-range writes land; a write to an absent row or a column
    /// beyond the row's width is dropped (`Change::None`). Edits never
    /// extend the dataset.
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> Change {
        match self.rows.get_mut(row) {
            Some(Row::Scalar(slot)) if col == 0 => {
                *slot = value;
                Change::Value { row, col: None }
            }
            Some(Row::Cells(cells)) => match cells.get_mut(col) {
                Some(slot) => {
                    *slot = value;
                    Change::Value {
                        row,
                        col: Some(col),
                    }
                }
                None => Change::None,
            },
            _ => Change::None,
        }
    }

    /// Remove the row at `index`. Always structural when it lands.
    pub fn remove(&mut self, index: usize) -> Change {
        if index < self.rows.len() {
            self.rows.remove(index);
            Change::Structural
        } else {
            Change::None
        }
    }

    /// Replace the whole dataset. Structural; re-applies the capacity clamp.
    pub fn set_rows(&mut self, rows: Vec<Row>) -> Change {
        self.rows = rows;
        self.enforce_limits();
        Change::Structural
    }

    /// Truncate to the capacity limits, warning once per offending mutation.
    fn enforce_limits(&mut self) {
        if self.rows.len() > self.max_rows {
            self.warn_truncated(self.rows.len());
            self.rows.truncate(self.max_rows);
        }
        if let Some(max_cols) = self.max_cols {
            let mut clipped = false;
            for row in &mut self.rows {
                if let Row::Cells(cells) = row {
                    if cells.len() > max_cols {
                        cells.truncate(max_cols);
                        clipped = true;
                    }
                }
            }
            if clipped {
                self.truncation_count += 1;
                log::warn(&format!(
                    "rows are being clipped to the maximum column count ({max_cols})"
                ));
            }
        }
    }

    fn clamp_row(&mut self, row: Row) -> Row {
        let Some(max_cols) = self.max_cols else {
            return row;
        };
        match row {
            Row::Cells(mut cells) if cells.len() > max_cols => {
                cells.truncate(max_cols);
                self.truncation_count += 1;
                log::warn(&format!(
                    "row is being clipped to the maximum column count ({max_cols})"
                ));
                Row::Cells(cells)
            }
            other => other,
        }
    }

    fn warn_truncated(&mut self, attempted: usize) {
        self.truncation_count += 1;
        log::warn(&format!(
            "data is being truncated because the maximum number of rows is {} (attempted {attempted})",
            self.max_rows
        ));
    }
}
