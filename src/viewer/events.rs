//! DOM event wiring and JS value plumbing for the WASM wrappers.
//!
//! All helpers here are `pub(crate)` and called from the wasm-exported
//! constructors in `mod.rs` and `grid.rs`. Closures are returned to the
//! caller, which keeps them alive for the lifetime of the wrapper.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, FocusEvent, HtmlElement};

use super::grid::{GridUpdateFn, GridView};
use super::{ScrollView, UpdateFn};
use crate::error::VscrollError;
use crate::log;
use crate::options::ScrollOptions;
use crate::surface::{DomSurface, ROW_SLOT_ATTR, SLOT_ATTR};
use crate::value::CellValue;

/// Parse a JS options object, treating `null`/`undefined` as defaults.
pub(crate) fn parse_options(options: JsValue) -> Result<ScrollOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ScrollOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("invalid options: {e}")))
}

/// The conventional root element (`#body`), used by `mount`.
pub(crate) fn well_known_root() -> Result<HtmlElement, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("body"))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| VscrollError::Config("no element with id \"body\"".into()).into())
}

/// Convert one JS scalar into a cell value.
pub(crate) fn js_to_cell_value(value: JsValue) -> Result<CellValue, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("invalid value: {e}")))
}

/// Convert a JS array of scalars into cell values.
pub(crate) fn js_to_cell_values(data: JsValue) -> Result<Vec<CellValue>, JsValue> {
    serde_wasm_bindgen::from_value(data)
        .map_err(|e| JsValue::from_str(&format!("invalid data: {e}")))
}

/// Convert a JS array of row arrays into cell runs.
pub(crate) fn js_to_cell_rows(data: JsValue) -> Result<Vec<Vec<CellValue>>, JsValue> {
    serde_wasm_bindgen::from_value(data)
        .map_err(|e| JsValue::from_str(&format!("invalid data: {e}")))
}

/// Wrap a JS render callback for list mode: `(cell, value, rowIndex)`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn wrap_update_1d(callback: Function) -> UpdateFn<Element> {
    Box::new(move |node: &Element, value: &CellValue, index: usize| {
        let js_value = serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL);
        let _ = callback.call3(
            &JsValue::NULL,
            node.as_ref(),
            &js_value,
            &JsValue::from_f64(index as f64),
        );
    })
}

/// Wrap a JS render callback for grid mode:
/// `(cell, value, rowIndex, colIndex)`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn wrap_update_2d(callback: Function) -> GridUpdateFn<Element> {
    Box::new(
        move |node: &Element, value: &CellValue, row: usize, col: usize| {
            let js_value = serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL);
            let args = js_sys::Array::of4(
                node.as_ref(),
                &js_value,
                &JsValue::from_f64(row as f64),
                &JsValue::from_f64(col as f64),
            );
            let _ = callback.apply(&JsValue::NULL, &args);
        },
    )
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: Box<dyn FnMut(web_sys::Event)>,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let closure = Closure::wrap(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure
}

fn listen_focus(
    target: &web_sys::EventTarget,
    event: &str,
    handler: Box<dyn FnMut(FocusEvent)>,
) -> Closure<dyn FnMut(FocusEvent)> {
    let closure = Closure::wrap(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure
}

/// Slot index stored on an element, if any.
fn slot_of(element: &Element, key: &str) -> Option<usize> {
    element.get_attribute(key)?.parse().ok()
}

/// The element an edit-commit event landed on.
fn event_cell(event: &FocusEvent) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

// ----------------------------------------------------------------------------
// 1-D wiring
// ----------------------------------------------------------------------------

/// Subscribe to the scroll parent's `scroll` event.
pub(crate) fn attach_scroll(
    view: &Rc<RefCell<ScrollView<DomSurface>>>,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let target: web_sys::EventTarget = view.borrow().surface().scroll_parent().clone().into();
    let view = Rc::clone(view);
    listen(
        &target,
        "scroll",
        Box::new(move |_event: web_sys::Event| {
            let mut v = view.borrow_mut();
            let offset = v.surface().scroll_top();
            v.on_scroll(offset);
        }),
    )
}

/// Subscribe to the window `resize` event.
pub(crate) fn attach_resize(
    view: &Rc<RefCell<ScrollView<DomSurface>>>,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let view = Rc::clone(view);
    let handler = Box::new(move |_event: web_sys::Event| {
        let mut v = view.borrow_mut();
        let extent = v.surface().client_height();
        if let Err(e) = v.on_resize(extent) {
            log::warn(&format!("resize failed: {e}"));
        }
    });
    match web_sys::window() {
        Some(window) => listen(&window.into(), "resize", handler),
        None => Closure::wrap(handler),
    }
}

/// Subscribe to `focusout` on the root element: a cell losing focus
/// commits its edit.
pub(crate) fn attach_edit_commit(
    view: &Rc<RefCell<ScrollView<DomSurface>>>,
) -> Closure<dyn FnMut(FocusEvent)> {
    let target: web_sys::EventTarget = view.borrow().surface().root().clone().into();
    let view = Rc::clone(view);
    listen_focus(
        &target,
        "focusout",
        Box::new(move |event: FocusEvent| {
            let Some(cell) = event_cell(&event) else {
                return;
            };
            let Some(slot) = slot_of(&cell, SLOT_ATTR) else {
                return;
            };
            if let Err(e) = view.borrow_mut().commit_edit(slot) {
                log::warn(&format!("edit commit failed: {e}"));
            }
        }),
    )
}

// ----------------------------------------------------------------------------
// 2-D wiring
// ----------------------------------------------------------------------------

/// Subscribe to the scroll parent's `scroll` event (both axes).
pub(crate) fn attach_grid_scroll(
    view: &Rc<RefCell<GridView<DomSurface>>>,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let target: web_sys::EventTarget = view.borrow().surface().scroll_parent().clone().into();
    let view = Rc::clone(view);
    listen(
        &target,
        "scroll",
        Box::new(move |_event: web_sys::Event| {
            let mut v = view.borrow_mut();
            let top = v.surface().scroll_top();
            let left = v.surface().scroll_left();
            v.on_scroll(top, left);
        }),
    )
}

/// Subscribe to the window `resize` event (both axes).
pub(crate) fn attach_grid_resize(
    view: &Rc<RefCell<GridView<DomSurface>>>,
) -> Closure<dyn FnMut(web_sys::Event)> {
    let view = Rc::clone(view);
    let handler = Box::new(move |_event: web_sys::Event| {
        let mut v = view.borrow_mut();
        let height = v.surface().client_height();
        let width = v.surface().client_width();
        if let Err(e) = v.on_resize(height, width) {
            log::warn(&format!("resize failed: {e}"));
        }
    });
    match web_sys::window() {
        Some(window) => listen(&window.into(), "resize", handler),
        None => Closure::wrap(handler),
    }
}

/// Subscribe to `focusout` for grid edit commits. The cell carries its
/// column slot; its row container carries the row slot.
pub(crate) fn attach_grid_edit_commit(
    view: &Rc<RefCell<GridView<DomSurface>>>,
) -> Closure<dyn FnMut(FocusEvent)> {
    let target: web_sys::EventTarget = view.borrow().surface().root().clone().into();
    let view = Rc::clone(view);
    listen_focus(
        &target,
        "focusout",
        Box::new(move |event: FocusEvent| {
            let Some(cell) = event_cell(&event) else {
                return;
            };
            let Some(col_slot) = slot_of(&cell, SLOT_ATTR) else {
                return;
            };
            let Some(row_slot) = cell
                .parent_element()
                .and_then(|row| slot_of(&row, ROW_SLOT_ATTR))
            else {
                return;
            };
            if let Err(e) = view.borrow_mut().commit_edit(row_slot, col_slot) {
                log::warn(&format!("edit commit failed: {e}"));
            }
        }),
    )
}
