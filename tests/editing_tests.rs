//! Edit-commit tests
//!
//! Blur-driven commits: text diffing against the last rendered value,
//! type-tagged coercion, in-range-only writes, and the round trip back
//! through the render pass.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{grid_slot_node, grid_view, list_view, slot_node, slot_text};
use vscroll::surface::HeadlessSurface;
use vscroll::viewer::ScrollView;
use vscroll::{CellValue, ScrollOptions};

fn typed_view() -> ScrollView<HeadlessSurface> {
    let options = ScrollOptions {
        data: vec![
            serde_json::json!("hello"),
            serde_json::json!(7),
            serde_json::json!(true),
        ],
        cell_height: 50.0,
        ..ScrollOptions::default()
    };
    ScrollView::new(HeadlessSurface::new(), &options, 325.0, 0.0).unwrap()
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[test]
fn committing_42_to_a_number_cell_stores_a_number() {
    let mut view = typed_view();
    slot_node(&view, 1).set_text("42");
    view.commit_edit(1).unwrap();

    assert_eq!(
        view.store().value(1),
        CellValue::Number(42.0),
        "text coerces per the cell's number tag"
    );
    assert_eq!(
        slot_text(&view, 1),
        "42",
        "the next pass reflects the committed value"
    );
}

#[test]
fn commit_rerenders_exactly_the_edited_cell() {
    let mut view = typed_view();
    let calls = view.update_calls();
    slot_node(&view, 0).set_text("goodbye");
    view.commit_edit(0).unwrap();
    assert_eq!(view.update_calls(), calls + 1);
    assert_eq!(view.store().value(0), CellValue::Text("goodbye".into()));
}

// =============================================================================
// NO-OP AND OUT-OF-RANGE COMMITS
// =============================================================================

#[test]
fn unchanged_text_commits_nothing() {
    let mut view = typed_view();
    let calls = view.update_calls();
    view.commit_edit(0).unwrap(); // live text still equals "hello"
    assert_eq!(view.update_calls(), calls);
    assert_eq!(view.store().value(0), CellValue::Text("hello".into()));
}

#[test]
fn commit_on_an_overscrolled_slot_is_dropped() {
    let mut view = list_view(2, 50.0, 325.0);
    // Pool is clamped to 2, so scroll the window past the data instead.
    view.on_scroll(75.0); // slot 1 is bound to row 2, which is absent
    slot_node(&view, 1).set_text("ghost");
    view.commit_edit(1).unwrap();
    assert_eq!(view.data_len(), 2, "edits never extend the data");
}

#[test]
fn commit_on_an_unpooled_slot_is_dropped() {
    let mut view = typed_view();
    view.commit_edit(99).unwrap();
}

// =============================================================================
// COERCION
// =============================================================================

#[test]
fn number_coercion_failure_degrades_to_nan() {
    let mut view = typed_view();
    slot_node(&view, 1).set_text("not numeric");
    view.commit_edit(1).unwrap();
    let CellValue::Number(n) = view.store().value(1) else {
        panic!("the cell should stay numeric");
    };
    assert!(n.is_nan(), "failed parses store the NaN marker");
}

#[test]
fn boolean_coercion_is_nonempty_truthiness() {
    let mut view = typed_view();
    slot_node(&view, 2).set_text("");
    view.commit_edit(2).unwrap();
    assert_eq!(view.store().value(2), CellValue::Bool(false));

    // Re-render wrote "false" into the node; any non-empty text is true.
    slot_node(&view, 2).set_text("anything");
    view.commit_edit(2).unwrap();
    assert_eq!(view.store().value(2), CellValue::Bool(true));
}

#[test]
fn text_cells_commit_verbatim() {
    let mut view = typed_view();
    slot_node(&view, 0).set_text("  spaced  ");
    view.commit_edit(0).unwrap();
    assert_eq!(view.store().value(0), CellValue::Text("  spaced  ".into()));
}

// =============================================================================
// EDITS AFTER SCROLLING
// =============================================================================

#[test]
fn commit_lands_on_the_rebound_coordinate() {
    let mut view = list_view(100, 50.0, 325.0);
    view.on_scroll(1000.0); // slot 0 now bound to row 20
    slot_node(&view, 0).set_text("99");
    view.commit_edit(0).unwrap();
    assert_eq!(view.store().value(20), CellValue::Number(99.0));
    assert_eq!(view.store().value(0), CellValue::Number(0.0), "row 0 untouched");
}

#[test]
fn commit_after_a_fully_skipped_scroll_lands_on_the_rebound_row() {
    // Identical values everywhere: scrolling repaints nothing, but the
    // slot bindings must still move with the window.
    let options = ScrollOptions {
        data: vec![serde_json::json!("same"); 100],
        cell_height: 50.0,
        ..ScrollOptions::default()
    };
    let mut view = ScrollView::new(HeadlessSurface::new(), &options, 325.0, 0.0).unwrap();

    let calls = view.update_calls();
    view.on_scroll(1000.0); // slot 0 now bound to row 20
    assert_eq!(view.update_calls(), calls, "every slot's value is unchanged");

    slot_node(&view, 0).set_text("moved");
    view.commit_edit(0).unwrap();
    assert_eq!(view.store().value(20), CellValue::Text("moved".into()));
    assert_eq!(
        view.store().value(0),
        CellValue::Text("same".into()),
        "the edit must not land on the pre-scroll binding"
    );
}

// =============================================================================
// GRID COMMITS
// =============================================================================

#[test]
fn grid_commit_resolves_both_slots() {
    let mut view = grid_view(100, 20, 50.0, 100.0, 325.0, 450.0);
    view.on_scroll(1234.0, 250.0); // indices (24, 2)
    grid_slot_node(&view, 0, 0).set_text("777");
    view.commit_edit(0, 0).unwrap();
    assert_eq!(
        view.store().get_cell(24, 2),
        CellValue::Number(777.0),
        "the edit lands on the bound grid coordinate"
    );
}

#[test]
fn grid_commit_to_a_ragged_gap_is_dropped() {
    let mut view = grid_view(2, 2, 50.0, 100.0, 325.0, 450.0);
    view.set_row(1, vec![CellValue::Number(5.0)]).unwrap();
    // Slot (1, 1) is bound to the missing cell (1, 1).
    grid_slot_node(&view, 1, 1).set_text("10");
    view.commit_edit(1, 1).unwrap();
    assert_eq!(view.store().get_cell(1, 1), CellValue::Null);
}
