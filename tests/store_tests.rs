//! Data store tests
//!
//! Change classification (structural vs. value), capacity truncation and
//! its warn-once accounting, and the uniform-column-count rule.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use vscroll::{Axis, CellValue, Change, DataStore, Row};

fn scalar_rows(len: usize) -> Vec<Row> {
    #[allow(clippy::cast_precision_loss)]
    (0..len)
        .map(|i| Row::Scalar(CellValue::Number(i as f64)))
        .collect()
}

// =============================================================================
// CHANGE CLASSIFICATION
// =============================================================================

#[test]
fn in_range_scalar_write_is_a_value_change() {
    let mut store = DataStore::new(scalar_rows(10), 1000, None);
    let change = store.set_value(3, CellValue::Text("x".into()));
    assert_eq!(
        change,
        Change::Value { row: 3, col: None },
        "in-range writes only re-render"
    );
    assert_eq!(store.len(), 10);
}

#[test]
fn extending_write_is_structural_and_pads_with_null() {
    let mut store = DataStore::new(scalar_rows(10), 1000, None);
    let change = store.set_value(14, CellValue::Bool(true));
    assert_eq!(change, Change::Structural);
    assert_eq!(store.len(), 15);
    assert_eq!(store.value(12), CellValue::Null, "the gap is null-padded");
    assert_eq!(store.value(14), CellValue::Bool(true));
}

#[test]
fn delete_is_always_structural() {
    let mut store = DataStore::new(scalar_rows(10), 1000, None);
    assert_eq!(store.remove(0), Change::Structural);
    assert_eq!(store.len(), 9);
    assert_eq!(store.value(0), CellValue::Number(1.0));
}

#[test]
fn out_of_range_delete_is_a_noop() {
    let mut store = DataStore::new(scalar_rows(10), 1000, None);
    assert_eq!(store.remove(99), Change::None);
    assert_eq!(store.len(), 10);
}

#[test]
fn row_shape_change_is_structural() {
    let mut store = DataStore::new(
        vec![
            Row::Cells(vec![CellValue::Number(1.0), CellValue::Number(2.0)]),
            Row::Cells(vec![CellValue::Number(3.0), CellValue::Number(4.0)]),
        ],
        1000,
        None,
    );
    let same_shape = store.set(0, Row::Cells(vec![CellValue::Null, CellValue::Null]));
    assert_eq!(same_shape, Change::Value { row: 0, col: None });
    let wider = store.set(1, Row::Cells(vec![CellValue::Null; 3]));
    assert_eq!(wider, Change::Structural);
}

#[test]
fn cell_write_beyond_row_width_is_dropped() {
    let mut store = DataStore::new(vec![Row::Cells(vec![CellValue::Null; 2])], 1000, None);
    assert_eq!(store.set_cell(0, 5, CellValue::Bool(true)), Change::None);
    assert_eq!(store.set_cell(3, 0, CellValue::Bool(true)), Change::None);
}

// =============================================================================
// CAPACITY TRUNCATION
// =============================================================================

#[test]
fn scenario_b_oversized_dataset_truncates_with_one_warning() {
    // cellHeight=50 → floor(16777200/50) = 335544 addressable rows
    let max_rows = Axis::new(50.0).unwrap().max_display_count();
    assert_eq!(max_rows, 335_544);

    let store = DataStore::new(scalar_rows(400_000), max_rows, None);
    assert_eq!(store.len(), 335_544, "data beyond the limit is dropped");
    assert_eq!(
        store.truncation_count(),
        1,
        "exactly one warning per offending mutation"
    );
}

#[test]
fn truncation_is_idempotent_per_mutation() {
    let mut store = DataStore::new(scalar_rows(100), 50, None);
    assert_eq!(store.len(), 50);
    assert_eq!(store.truncation_count(), 1);

    // Re-applying the same oversized dataset truncates again (one more
    // warning) but the stored length is unchanged.
    store.set_rows(scalar_rows(100));
    assert_eq!(store.len(), 50);
    assert_eq!(store.truncation_count(), 2);
}

#[test]
fn write_beyond_max_rows_is_dropped_with_a_warning() {
    let mut store = DataStore::new(scalar_rows(10), 50, None);
    assert_eq!(store.set_value(60, CellValue::Bool(true)), Change::None);
    assert_eq!(store.len(), 10);
    assert_eq!(store.truncation_count(), 1);
}

#[test]
fn wide_rows_are_clipped_to_max_cols() {
    let mut store = DataStore::new(Vec::new(), 50, Some(3));
    store.set(0, Row::Cells(vec![CellValue::Null; 5]));
    assert_eq!(store.column_count(), 3, "columns clip like rows do");
    assert_eq!(store.truncation_count(), 1);
}

// =============================================================================
// SHAPE RULES
// =============================================================================

#[test]
fn column_count_of_empty_store_is_zero() {
    let store = DataStore::new(Vec::new(), 1000, None);
    assert_eq!(store.column_count(), 0);
}

#[test]
fn ragged_rows_read_null_beyond_their_width() {
    let store = DataStore::new(
        vec![
            Row::Cells(vec![CellValue::Number(1.0), CellValue::Number(2.0)]),
            Row::Cells(vec![CellValue::Number(3.0)]),
        ],
        1000,
        None,
    );
    assert_eq!(store.column_count(), 2);
    assert_eq!(store.get_cell(1, 1), CellValue::Null);
}
