//! Viewport controller tests
//!
//! The render-skip invariant, pool-size invariant under resize,
//! structural-change propagation, custom render callbacks, and debug-sink
//! mirroring.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{list_view, numbered_data, slot_text};
use vscroll::surface::HeadlessSurface;
use vscroll::viewer::ScrollView;
use vscroll::{CellValue, ScrollOptions};

// =============================================================================
// RENDER SKIP INVARIANT
// =============================================================================

#[test]
fn second_identical_pass_invokes_nothing() {
    let mut view = list_view(1000, 50.0, 325.0);
    let after_init = view.update_calls();
    assert_eq!(after_init, 8, "initial pass renders every pooled cell");

    view.render();
    assert_eq!(
        view.update_calls(),
        after_init,
        "a pass with no intervening change must invoke zero callbacks"
    );
}

#[test]
fn rescrolling_to_the_same_index_invokes_nothing() {
    let mut view = list_view(1000, 50.0, 325.0);
    view.on_scroll(1234.0);
    let calls = view.update_calls();
    view.on_scroll(1240.0); // same cell, sub-cell offset
    assert_eq!(view.update_calls(), calls);
}

#[test]
fn scrolling_one_row_rerenders_the_shifted_window() {
    let mut view = list_view(1000, 50.0, 325.0);
    let calls = view.update_calls();
    view.on_scroll(50.0);
    assert_eq!(
        view.update_calls(),
        calls + 8,
        "every slot's backing value shifted by one"
    );
}

// =============================================================================
// POOL SIZE INVARIANT
// =============================================================================

#[test]
fn resize_rederives_the_pool_from_the_client_extent() {
    let mut view = list_view(1000, 50.0, 325.0);
    view.on_resize(500.0).unwrap();
    assert_eq!(view.pool_len(), 11, "ceil(500/50)+1 = 11");

    view.on_resize(120.0).unwrap();
    assert_eq!(view.pool_len(), 4, "ceil(120/50)+1 = 4");
}

#[test]
fn resize_never_exceeds_the_data_length() {
    let mut view = list_view(5, 50.0, 325.0);
    view.on_resize(10_000.0).unwrap();
    assert_eq!(view.pool_len(), 5);
}

#[test]
fn scroll_never_resizes_the_pool() {
    let mut view = list_view(1000, 50.0, 325.0);
    let pool = view.pool_len();
    view.on_scroll(40_000.0);
    assert_eq!(view.pool_len(), pool);
}

// =============================================================================
// STRUCTURAL CHANGE PROPAGATION
// =============================================================================

#[test]
fn extending_write_rederives_extent_and_pool() {
    let mut view = list_view(3, 50.0, 325.0);
    assert_eq!(view.pool_len(), 3);

    view.set_value(19, CellValue::Text("tail".into())).unwrap();
    assert_eq!(view.data_len(), 20);
    assert_eq!(view.surface().content_height(), 1000.0);
    assert_eq!(view.pool_len(), 8, "pool re-clamps to the grown dataset");
}

#[test]
fn removing_rows_shrinks_extent_and_reclamps() {
    let mut view = list_view(10, 50.0, 325.0);
    for _ in 0..6 {
        view.remove_row(0).unwrap();
    }
    assert_eq!(view.data_len(), 4);
    assert_eq!(view.pool_len(), 4);
    assert_eq!(
        view.surface().content_height(),
        325.0,
        "extent is lower-bounded by the viewport"
    );
}

#[test]
fn value_change_rerenders_only_the_affected_cell() {
    let mut view = list_view(100, 50.0, 325.0);
    let calls = view.update_calls();
    view.set_value(2, CellValue::Text("changed".into())).unwrap();
    assert_eq!(view.update_calls(), calls + 1);
    assert_eq!(slot_text(&view, 2), "changed");
}

#[test]
fn offscreen_value_change_invokes_nothing() {
    let mut view = list_view(1000, 50.0, 325.0);
    let calls = view.update_calls();
    view.set_value(500, CellValue::Text("far away".into())).unwrap();
    assert_eq!(view.update_calls(), calls, "row 500 is not in the window");
}

// =============================================================================
// CUSTOM RENDER CALLBACK
// =============================================================================

#[test]
fn custom_callback_sees_only_changed_cells() {
    let mut view = list_view(100, 50.0, 325.0);
    let seen: Rc<RefCell<Vec<(usize, CellValue)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    view.set_update(Some(Box::new(move |_node, value, index| {
        sink.borrow_mut().push((index, value.clone()));
    })));

    view.on_scroll(50.0);
    let indices: Vec<usize> = seen.borrow().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

// =============================================================================
// DEBUG SINK MIRRORING
// =============================================================================

#[test]
fn debug_box_mirrors_pool_and_index_changes() {
    let options = ScrollOptions {
        data: numbered_data(1000),
        cell_height: 50.0,
        debug: true,
        ..ScrollOptions::default()
    };
    let mut view = ScrollView::new(HeadlessSurface::new(), &options, 325.0, 0.0).unwrap();

    let debug = view.debug_box().expect("debug sink should be enabled");
    assert_eq!(debug.value("data.length"), Some("1000"));
    assert_eq!(debug.value("virtualCells.length"), Some("8"));

    view.on_scroll(1234.0);
    let debug = view.debug_box().unwrap();
    assert_eq!(debug.value("currentIndex"), Some("24"));

    view.on_resize(500.0).unwrap();
    let debug = view.debug_box().unwrap();
    assert_eq!(debug.value("virtualCells.length"), Some("11"));
}

#[test]
fn debug_box_is_absent_by_default() {
    let view = list_view(10, 50.0, 325.0);
    assert!(view.debug_box().is_none());
}
