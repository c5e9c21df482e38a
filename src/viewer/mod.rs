//! Viewport controllers - the primary entry points for virtual scrolling.
//!
//! This module provides:
//! - `ScrollView`: the target-independent 1-D windowing core
//! - `VirtualScroll`: the WASM-exported wrapper that binds a `ScrollView`
//!   to a DOM element and wires scroll/resize/edit events automatically
//!
//! The 2-D counterparts (`GridView`, `VirtualGrid`) live in `grid`.

#[cfg(target_arch = "wasm32")]
pub(crate) mod events;
pub mod grid;

pub use grid::GridView;

use crate::debug::DebugBox;
use crate::error::Result;
use crate::layout::Axis;
use crate::options::ScrollOptions;
use crate::pool::CellPool;
use crate::store::{Change, DataStore, Row};
use crate::surface::Surface;
use crate::value::{coerce, CellValue};

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlElement};

#[cfg(target_arch = "wasm32")]
use crate::surface::DomSurface;

/// Caller-supplied render callback: `(node, value, row_index)`.
///
/// Invoked only for cells whose backing value actually changed; the
/// default (when none is set) writes `value.display()` into the node.
pub type UpdateFn<N> = Box<dyn FnMut(&N, &CellValue, usize)>;

/// 1-D viewport controller: maps a scroll offset to a window of recycled
/// cells over the dataset.
pub struct ScrollView<S: Surface> {
    surface: S,
    store: DataStore,
    axis: Axis,
    pool: CellPool<S::Node>,
    current_index: usize,
    viewport_extent: f64,
    update: Option<UpdateFn<S::Node>>,
    debug: Option<DebugBox>,
    update_calls: u64,
}

impl<S: Surface> ScrollView<S> {
    /// Build the controller: truncate the data to the addressable limit,
    /// size the scroll extent, do the initial pool sizing and render pass.
    ///
    /// `viewport_extent` is the scroll parent's client height and
    /// `initial_scroll` its current scroll offset, both in pixels.
    ///
    /// # Errors
    /// Fails on an invalid cell extent or a surface that cannot create
    /// cells.
    pub fn new(
        surface: S,
        options: &ScrollOptions,
        viewport_extent: f64,
        initial_scroll: f64,
    ) -> Result<Self> {
        let axis = Axis::new(options.cell_height)?;
        let rows = options
            .scalar_rows()
            .into_iter()
            .map(Row::Scalar)
            .collect();
        let store = DataStore::new(rows, axis.max_display_count(), None);

        let debug = options.debug.then(|| {
            DebugBox::new(&[
                ("data.length", store.len().to_string()),
                ("virtualCells.length", "0".to_string()),
                ("cellHeight", options.cell_height.to_string()),
                ("currentIndex", axis.first_index(initial_scroll).to_string()),
            ])
        });

        let mut view = ScrollView {
            surface,
            store,
            axis,
            pool: CellPool::new(),
            current_index: axis.first_index(initial_scroll),
            viewport_extent,
            update: None,
            debug,
            update_calls: 0,
        };

        view.sync_content_extent();
        view.resize_pool()?;
        view.render();
        Ok(view)
    }

    /// Replace the render callback (`None` restores the default).
    pub fn set_update(&mut self, update: Option<UpdateFn<S::Node>>) {
        self.update = update;
    }

    /// Scroll event: re-derive the first visible index and re-render.
    /// Never resizes the pool (pool size is viewport-driven).
    pub fn on_scroll(&mut self, scroll_offset: f64) {
        self.current_index = self.axis.first_index(scroll_offset);
        self.render();
        let entry = ("currentIndex", self.current_index.to_string());
        if let Some(debug) = self.debug.as_mut() {
            debug.update(&[entry]);
        }
    }

    /// Resize event: re-derive the pool size from the new client extent,
    /// then re-render.
    ///
    /// # Errors
    /// Fails when the surface cannot create cells for pool growth.
    pub fn on_resize(&mut self, viewport_extent: f64) -> Result<()> {
        self.viewport_extent = viewport_extent;
        self.sync_content_extent();
        self.resize_pool()?;
        self.render();
        Ok(())
    }

    /// Render pass: bind each pool slot to `current_index + slot`, skip
    /// slots whose backing value is unchanged, invoke the update callback
    /// for the rest, and align the pool via lead padding.
    pub fn render(&mut self) {
        let current = self.current_index;
        let mut calls = 0u64;
        for (i, cell) in self.pool.iter_mut().enumerate() {
            let index = current + i;
            let value = self.store.value(index);
            // The binding is refreshed even when the value is unchanged,
            // so a later edit commits to the right coordinate.
            cell.meta.bound_row = Some(index);
            cell.meta.bound_col = None;
            if cell.meta.last_value.as_ref() == Some(&value) {
                continue;
            }
            match self.update.as_mut() {
                Some(update) => update(&cell.node, &value, index),
                None => self.surface.set_text(&cell.node, &value.display()),
            }
            cell.meta.last_type = value.value_type();
            cell.meta.last_value = Some(value);
            calls += 1;
        }
        self.surface
            .set_lead_padding(None, self.axis.lead_offset(current));
        self.update_calls += calls;
    }

    /// Edit commit for the cell at `slot`: if its live text differs from
    /// the last rendered value, coerce per the recorded type tag and write
    /// through the store. In-range only; an edit never extends the data.
    ///
    /// # Errors
    /// Fails only when a structural result forces pool growth and the
    /// surface refuses.
    pub fn commit_edit(&mut self, slot: usize) -> Result<()> {
        let Some(cell) = self.pool.get(slot) else {
            return Ok(());
        };
        let text = self.surface.text(&cell.node);
        let last_display = cell
            .meta
            .last_value
            .as_ref()
            .map(CellValue::display)
            .unwrap_or_default();
        if text == last_display {
            return Ok(());
        }
        let Some(row) = cell.meta.bound_row else {
            return Ok(());
        };
        let value = coerce(&text, cell.meta.last_type);
        let change = self.store.set_cell(row, 0, value);
        self.apply_change(change)
    }

    /// Write the scalar at `index` (extending writes are structural).
    ///
    /// # Errors
    /// See [`Self::commit_edit`].
    pub fn set_value(&mut self, index: usize, value: CellValue) -> Result<()> {
        let change = self.store.set_value(index, value);
        self.apply_change(change)
    }

    /// Remove the row at `index` (always structural when it lands).
    ///
    /// # Errors
    /// See [`Self::commit_edit`].
    pub fn remove_row(&mut self, index: usize) -> Result<()> {
        let change = self.store.remove(index);
        self.apply_change(change)
    }

    /// Replace the whole dataset.
    ///
    /// # Errors
    /// See [`Self::commit_edit`].
    pub fn set_data(&mut self, values: Vec<CellValue>) -> Result<()> {
        let change = self
            .store
            .set_rows(values.into_iter().map(Row::Scalar).collect());
        self.apply_change(change)
    }

    /// React to a completed store mutation: structural changes re-derive
    /// the scroll extent and re-clamp the pool; value changes just
    /// re-render.
    pub(crate) fn apply_change(&mut self, change: Change) -> Result<()> {
        match change {
            Change::None => Ok(()),
            Change::Value { .. } => {
                self.render();
                Ok(())
            }
            Change::Structural => {
                self.sync_content_extent();
                self.resize_pool()?;
                self.render();
                let entry = ("data.length", self.store.len().to_string());
                if let Some(debug) = self.debug.as_mut() {
                    debug.update(&[entry]);
                }
                Ok(())
            }
        }
    }

    fn sync_content_extent(&mut self) {
        let extent = self
            .axis
            .content_extent(self.store.len(), self.viewport_extent);
        self.surface.set_content_extent(None, extent);
    }

    fn resize_pool(&mut self) -> Result<()> {
        let target = self
            .axis
            .pool_target(self.viewport_extent, self.store.len());
        self.pool.resize(&self.surface, None, target)?;
        let entry = ("virtualCells.length", self.pool.len().to_string());
        if let Some(debug) = self.debug.as_mut() {
            debug.update(&[entry]);
        }
        Ok(())
    }

    /// First visible row index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Current pool size.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Current dataset length.
    #[must_use]
    pub fn data_len(&self) -> usize {
        self.store.len()
    }

    /// Maximum addressable row count for this cell height.
    #[must_use]
    pub fn max_display_count(&self) -> usize {
        self.axis.max_display_count()
    }

    /// Total update-callback invocations so far (render-skip accounting).
    #[must_use]
    pub fn update_calls(&self) -> u64 {
        self.update_calls
    }

    /// The underlying dataset.
    #[must_use]
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// The rendering surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The cell pool (read-only).
    #[must_use]
    pub fn pool(&self) -> &CellPool<S::Node> {
        &self.pool
    }

    /// The debug sink, when enabled.
    #[must_use]
    pub fn debug_box(&self) -> Option<&DebugBox> {
        self.debug.as_ref()
    }
}

// ============================================================================
// WASM32 wrapper
// ============================================================================

/// The WASM-exported 1-D virtual scroller.
///
/// Construction binds to the element's scrollable parent and subscribes to
/// `scroll`, window `resize`, and `focusout` (edit commit) - no manual
/// JavaScript wiring required.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct VirtualScroll {
    view: Rc<RefCell<ScrollView<DomSurface>>>,
    #[allow(dead_code)]
    scroll_closure: Closure<dyn FnMut(web_sys::Event)>,
    #[allow(dead_code)]
    resize_closure: Closure<dyn FnMut(web_sys::Event)>,
    #[allow(dead_code)]
    blur_closure: Closure<dyn FnMut(web_sys::FocusEvent)>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl VirtualScroll {
    /// Create a scroller on `element`, whose parent becomes the scroll
    /// container. `options` is a plain JS object (see `ScrollOptions`);
    /// `cell` is an optional prototype node cloned per pool slot.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlElement,
        options: JsValue,
        cell: Option<Element>,
    ) -> Result<VirtualScroll, JsValue> {
        console_error_panic_hook::set_once();

        let options = events::parse_options(options)?;
        let surface = DomSurface::new(element, cell)?;
        let viewport_extent = surface.client_height();
        let initial_scroll = surface.scroll_top();
        let view = ScrollView::new(surface, &options, viewport_extent, initial_scroll)?;
        let view = Rc::new(RefCell::new(view));

        let scroll_closure = events::attach_scroll(&view);
        let resize_closure = events::attach_resize(&view);
        let blur_closure = events::attach_edit_commit(&view);

        Ok(VirtualScroll {
            view,
            scroll_closure,
            resize_closure,
            blur_closure,
        })
    }

    /// Create a scroller on the element with id `body` (the conventional
    /// root), equivalent to the constructor otherwise.
    pub fn mount(options: JsValue, cell: Option<Element>) -> Result<VirtualScroll, JsValue> {
        let element = events::well_known_root()?;
        Self::new(element, options, cell)
    }

    /// Register a render callback `(cell, value, rowIndex)`; `null`
    /// restores the default text renderer.
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        let update = callback.map(events::wrap_update_1d);
        self.view.borrow_mut().set_update(update);
    }

    /// Force a render pass.
    pub fn render(&self) {
        self.view.borrow_mut().render();
    }

    /// Write the scalar at `index`; extending writes grow the dataset.
    pub fn set_value(&self, index: usize, value: JsValue) -> Result<(), JsValue> {
        let value = events::js_to_cell_value(value)?;
        self.view.borrow_mut().set_value(index, value)?;
        Ok(())
    }

    /// Remove the row at `index`.
    pub fn remove_row(&self, index: usize) -> Result<(), JsValue> {
        self.view.borrow_mut().remove_row(index)?;
        Ok(())
    }

    /// Replace the whole dataset with a JS array of scalars.
    pub fn set_data(&self, data: JsValue) -> Result<(), JsValue> {
        let values = events::js_to_cell_values(data)?;
        self.view.borrow_mut().set_data(values)?;
        Ok(())
    }

    /// First visible row index.
    pub fn current_index(&self) -> usize {
        self.view.borrow().current_index()
    }

    /// Current pool size.
    pub fn pool_len(&self) -> usize {
        self.view.borrow().pool_len()
    }

    /// Current dataset length (after truncation).
    pub fn data_len(&self) -> usize {
        self.view.borrow().data_len()
    }

    /// Maximum addressable row count for the configured cell height.
    pub fn max_display_count(&self) -> usize {
        self.view.borrow().max_display_count()
    }
}
