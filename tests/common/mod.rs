//! Shared helpers for vscroll integration tests.
//!
//! Views are built over the headless surface so the windowing, pooling,
//! and edit-commit behavior can be observed natively: child order, node
//! text, slot tags, content extents and lead padding.

#![allow(dead_code)]

use vscroll::surface::{HeadlessNode, HeadlessSurface};
use vscroll::viewer::{GridView, ScrollView};
use vscroll::ScrollOptions;

/// `[0, 1, 2, ...]` as a JSON dataset.
pub fn numbered_data(len: usize) -> Vec<serde_json::Value> {
    (0..len).map(|i| serde_json::json!(i)).collect()
}

/// Row-major grid data where cell `(r, c)` holds `r * 1000 + c`.
pub fn grid_data(rows: usize, cols: usize) -> Vec<serde_json::Value> {
    (0..rows)
        .map(|r| {
            let row: Vec<serde_json::Value> =
                (0..cols).map(|c| serde_json::json!(r * 1000 + c)).collect();
            serde_json::Value::Array(row)
        })
        .collect()
}

/// A 1-D view over `len` numbered rows.
pub fn list_view(len: usize, cell_height: f64, viewport: f64) -> ScrollView<HeadlessSurface> {
    let options = ScrollOptions {
        data: numbered_data(len),
        cell_height,
        ..ScrollOptions::default()
    };
    ScrollView::new(HeadlessSurface::new(), &options, viewport, 0.0)
        .expect("view construction should succeed")
}

/// A 2-D view over `rows × cols` numbered cells.
pub fn grid_view(
    rows: usize,
    cols: usize,
    cell_height: f64,
    cell_width: f64,
    viewport_height: f64,
    viewport_width: f64,
) -> GridView<HeadlessSurface> {
    let options = ScrollOptions {
        data: grid_data(rows, cols),
        cell_height,
        cell_width,
        ..ScrollOptions::default()
    };
    GridView::new(
        HeadlessSurface::new(),
        &options,
        viewport_height,
        viewport_width,
        0.0,
        0.0,
    )
    .expect("grid construction should succeed")
}

/// The pooled cell node at `slot` in a 1-D view.
pub fn slot_node(view: &ScrollView<HeadlessSurface>, slot: usize) -> HeadlessNode {
    view.surface()
        .root()
        .child(slot)
        .expect("slot should be pooled")
}

/// The text currently rendered into `slot` of a 1-D view.
pub fn slot_text(view: &ScrollView<HeadlessSurface>, slot: usize) -> String {
    slot_node(view, slot).text()
}

/// The pooled cell node at `(row_slot, col_slot)` in a grid view.
pub fn grid_slot_node(
    view: &GridView<HeadlessSurface>,
    row_slot: usize,
    col_slot: usize,
) -> HeadlessNode {
    view.surface()
        .root()
        .child(row_slot)
        .expect("row slot should be pooled")
        .child(col_slot)
        .expect("col slot should be pooled")
}

/// The text currently rendered into `(row_slot, col_slot)` of a grid view.
pub fn grid_slot_text(view: &GridView<HeadlessSurface>, row_slot: usize, col_slot: usize) -> String {
    grid_slot_node(view, row_slot, col_slot).text()
}

/// All texts currently rendered in slot order (1-D).
pub fn rendered_window(view: &ScrollView<HeadlessSurface>) -> Vec<String> {
    (0..view.pool_len()).map(|i| slot_text(view, i)).collect()
}
