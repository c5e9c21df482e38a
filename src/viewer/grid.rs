//! 2-D viewport controller: a vertical pool of row containers, each
//! owning a horizontal pool of cells, windowed over a row/column dataset.

use crate::debug::DebugBox;
use crate::error::Result;
use crate::layout::Axis;
use crate::options::ScrollOptions;
use crate::pool::RowPool;
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
use super::events;
#[cfg(target_arch = "wasm32")]
use crate::surface::DomSurface;

/// Grid render callback: `(node, value, row_index, col_index)`.
pub type GridUpdateFn<N> = Box<dyn FnMut(&N, &CellValue, usize, usize)>;

/// 2-D viewport controller.
///
/// Vertical and horizontal axes window independently; the column count is
/// taken from the first row (zero for an empty dataset), and ragged rows
/// read as `Null` beyond their actual width.
pub struct GridView<S: Surface> {
    surface: S,
    store: DataStore,
    axis_y: Axis,
    axis_x: Axis,
    pool: RowPool<S::Node>,
    current_index_y: usize,
    current_index_x: usize,
    viewport_height: f64,
    viewport_width: f64,
    update: Option<GridUpdateFn<S::Node>>,
    debug: Option<DebugBox>,
    update_calls: u64,
}

impl<S: Surface> GridView<S> {
    /// Build the controller; see `ScrollView::new` for the shared
    /// semantics. Columns are truncated to their addressable maximum the
    /// same way rows are.
    ///
    /// # Errors
    /// Fails on invalid cell extents or a surface that cannot create
    /// nodes.
    pub fn new(
        surface: S,
        options: &ScrollOptions,
        viewport_height: f64,
        viewport_width: f64,
        initial_scroll_top: f64,
        initial_scroll_left: f64,
    ) -> Result<Self> {
        let axis_y = Axis::new(options.cell_height)?;
        let axis_x = Axis::new(options.cell_width)?;
        let rows = options.cell_rows().into_iter().map(Row::Cells).collect();
        let store = DataStore::new(
            rows,
            axis_y.max_display_count(),
            Some(axis_x.max_display_count()),
        );

        let current_index_y = axis_y.first_index(initial_scroll_top);
        let current_index_x = axis_x.first_index(initial_scroll_left);

        let debug = options.debug.then(|| {
            DebugBox::new(&[
                ("data.length", store.len().to_string()),
                ("columnCount", store.column_count().to_string()),
                ("virtualRows.length", "0".to_string()),
                ("virtualCells.length", "0".to_string()),
                ("cellHeight", options.cell_height.to_string()),
                ("cellWidth", options.cell_width.to_string()),
                ("currentIndexY", current_index_y.to_string()),
                ("currentIndexX", current_index_x.to_string()),
            ])
        });

        let mut view = GridView {
            surface,
            store,
            axis_y,
            axis_x,
            pool: RowPool::new(),
            current_index_y,
            current_index_x,
            viewport_height,
            viewport_width,
            update: None,
            debug,
            update_calls: 0,
        };

        view.sync_content_extent();
        view.resize_pools()?;
        view.render();
        Ok(view)
    }

    /// Replace the render callback (`None` restores the default).
    pub fn set_update(&mut self, update: Option<GridUpdateFn<S::Node>>) {
        self.update = update;
    }

    /// Scroll event on either axis. Never resizes the pools.
    pub fn on_scroll(&mut self, scroll_top: f64, scroll_left: f64) {
        self.current_index_y = self.axis_y.first_index(scroll_top);
        self.current_index_x = self.axis_x.first_index(scroll_left);
        self.render();
        let entries = [
            ("currentIndexY", self.current_index_y.to_string()),
            ("currentIndexX", self.current_index_x.to_string()),
        ];
        if let Some(debug) = self.debug.as_mut() {
            debug.update(&entries);
        }
    }

    /// Resize event: re-derive both pool sizes, then re-render.
    ///
    /// # Errors
    /// Fails when the surface cannot create nodes for pool growth.
    pub fn on_resize(&mut self, viewport_height: f64, viewport_width: f64) -> Result<()> {
        self.viewport_height = viewport_height;
        self.viewport_width = viewport_width;
        self.sync_content_extent();
        self.resize_pools()?;
        self.render();
        Ok(())
    }

    /// Render pass over the two-level pool; the skip rule and binding
    /// refresh mirror the 1-D pass, per cell.
    pub fn render(&mut self) {
        let (current_y, current_x) = (self.current_index_y, self.current_index_x);
        let mut calls = 0u64;
        for (i, pooled_row) in self.pool.iter_mut().enumerate() {
            let row_index = current_y + i;
            for (j, cell) in pooled_row.cells.iter_mut().enumerate() {
                let col_index = current_x + j;
                let value = self.store.get_cell(row_index, col_index);
                cell.meta.bound_row = Some(row_index);
                cell.meta.bound_col = Some(col_index);
                if cell.meta.last_value.as_ref() == Some(&value) {
                    continue;
                }
                match self.update.as_mut() {
                    Some(update) => update(&cell.node, &value, row_index, col_index),
                    None => self.surface.set_text(&cell.node, &value.display()),
                }
                cell.meta.last_type = value.value_type();
                cell.meta.last_value = Some(value);
                calls += 1;
            }
        }
        self.surface.set_lead_padding(
            Some(self.axis_x.lead_offset(current_x)),
            self.axis_y.lead_offset(current_y),
        );
        self.update_calls += calls;
    }

    /// Edit commit for the cell at `(row_slot, col_slot)`. Same contract
    /// as the 1-D commit: in-range writes only, coerced per the recorded
    /// type tag.
    ///
    /// # Errors
    /// Fails only when a structural result forces pool growth and the
    /// surface refuses.
    pub fn commit_edit(&mut self, row_slot: usize, col_slot: usize) -> Result<()> {
        let Some(cell) = self
            .pool
            .get(row_slot)
            .and_then(|row| row.cells.get(col_slot))
        else {
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
        let (Some(row), Some(col)) = (cell.meta.bound_row, cell.meta.bound_col) else {
            return Ok(());
        };
        let value = coerce(&text, cell.meta.last_type);
        let change = self.store.set_cell(row, col, value);
        self.apply_change(change)
    }

    /// Write a single cell; out-of-range writes are dropped.
    ///
    /// # Errors
    /// See [`Self::commit_edit`].
    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        let change = self.store.set_cell(row, col, value);
        self.apply_change(change)
    }

    /// Write a whole row (extending writes are structural).
    ///
    /// # Errors
    /// See [`Self::commit_edit`].
    pub fn set_row(&mut self, index: usize, cells: Vec<CellValue>) -> Result<()> {
        let change = self.store.set(index, Row::Cells(cells));
        self.apply_change(change)
    }

    /// Remove the row at `index`.
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
    pub fn set_data(&mut self, rows: Vec<Vec<CellValue>>) -> Result<()> {
        let change = self
            .store
            .set_rows(rows.into_iter().map(Row::Cells).collect());
        self.apply_change(change)
    }

    fn apply_change(&mut self, change: Change) -> Result<()> {
        match change {
            Change::None => Ok(()),
            Change::Value { .. } => {
                self.render();
                Ok(())
            }
            Change::Structural => {
                self.sync_content_extent();
                self.resize_pools()?;
                self.render();
                let entries = [
                    ("data.length", self.store.len().to_string()),
                    ("columnCount", self.store.column_count().to_string()),
                ];
                if let Some(debug) = self.debug.as_mut() {
                    debug.update(&entries);
                }
                Ok(())
            }
        }
    }

    fn sync_content_extent(&mut self) {
        let height = self
            .axis_y
            .content_extent(self.store.len(), self.viewport_height);
        let width = self
            .axis_x
            .content_extent(self.store.column_count(), self.viewport_width);
        self.surface.set_content_extent(Some(width), height);
    }

    fn resize_pools(&mut self) -> Result<()> {
        let target_rows = self
            .axis_y
            .pool_target(self.viewport_height, self.store.len());
        let target_cols = self
            .axis_x
            .pool_target(self.viewport_width, self.store.column_count());
        self.pool
            .resize_rows(&self.surface, target_rows, target_cols)?;
        self.pool.resize_cols(&self.surface, target_cols)?;
        let entries = [
            ("virtualRows.length", self.pool.len().to_string()),
            ("virtualCells.length", self.pool.cols().to_string()),
        ];
        if let Some(debug) = self.debug.as_mut() {
            debug.update(&entries);
        }
        Ok(())
    }

    /// First visible row index.
    #[must_use]
    pub fn current_index_y(&self) -> usize {
        self.current_index_y
    }

    /// First visible column index.
    #[must_use]
    pub fn current_index_x(&self) -> usize {
        self.current_index_x
    }

    /// Vertical pool size (row containers).
    #[must_use]
    pub fn row_pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Horizontal pool size (cells per row container).
    #[must_use]
    pub fn col_pool_len(&self) -> usize {
        self.pool.cols()
    }

    /// Current dataset length.
    #[must_use]
    pub fn data_len(&self) -> usize {
        self.store.len()
    }

    /// Uniform column count (width of the first row).
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.store.column_count()
    }

    /// Maximum addressable row count for this cell height.
    #[must_use]
    pub fn max_display_count_y(&self) -> usize {
        self.axis_y.max_display_count()
    }

    /// Maximum addressable column count for this cell width.
    #[must_use]
    pub fn max_display_count_x(&self) -> usize {
        self.axis_x.max_display_count()
    }

    /// Total update-callback invocations so far.
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

    /// The two-level pool (read-only).
    #[must_use]
    pub fn pool(&self) -> &RowPool<S::Node> {
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

/// The WASM-exported 2-D virtual grid.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct VirtualGrid {
    view: Rc<RefCell<GridView<DomSurface>>>,
    #[allow(dead_code)]
    scroll_closure: Closure<dyn FnMut(web_sys::Event)>,
    #[allow(dead_code)]
    resize_closure: Closure<dyn FnMut(web_sys::Event)>,
    #[allow(dead_code)]
    blur_closure: Closure<dyn FnMut(web_sys::FocusEvent)>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl VirtualGrid {
    /// Create a grid on `element`; see `VirtualScroll` for the wiring.
    /// `options.data` is a JS array of row arrays.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element: HtmlElement,
        options: JsValue,
        cell: Option<Element>,
    ) -> Result<VirtualGrid, JsValue> {
        console_error_panic_hook::set_once();

        let options = events::parse_options(options)?;
        let surface = DomSurface::new(element, cell)?;
        let viewport_width = surface.client_width();
        let viewport_height = surface.client_height();
        let scroll_left = surface.scroll_left();
        let scroll_top = surface.scroll_top();
        let view = GridView::new(
            surface,
            &options,
            viewport_height,
            viewport_width,
            scroll_top,
            scroll_left,
        )?;
        let view = Rc::new(RefCell::new(view));

        let scroll_closure = events::attach_grid_scroll(&view);
        let resize_closure = events::attach_grid_resize(&view);
        let blur_closure = events::attach_grid_edit_commit(&view);

        Ok(VirtualGrid {
            view,
            scroll_closure,
            resize_closure,
            blur_closure,
        })
    }

    /// Register a render callback `(cell, value, rowIndex, colIndex)`.
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        let update = callback.map(events::wrap_update_2d);
        self.view.borrow_mut().set_update(update);
    }

    /// Force a render pass.
    pub fn render(&self) {
        self.view.borrow_mut().render();
    }

    /// Write a single cell; out-of-range writes are dropped.
    pub fn set_cell(&self, row: usize, col: usize, value: JsValue) -> Result<(), JsValue> {
        let value = events::js_to_cell_value(value)?;
        self.view.borrow_mut().set_cell(row, col, value)?;
        Ok(())
    }

    /// Write a whole row from a JS array.
    pub fn set_row(&self, index: usize, cells: JsValue) -> Result<(), JsValue> {
        let cells = events::js_to_cell_values(cells)?;
        self.view.borrow_mut().set_row(index, cells)?;
        Ok(())
    }

    /// Remove the row at `index`.
    pub fn remove_row(&self, index: usize) -> Result<(), JsValue> {
        self.view.borrow_mut().remove_row(index)?;
        Ok(())
    }

    /// Replace the whole dataset with a JS array of row arrays.
    pub fn set_data(&self, data: JsValue) -> Result<(), JsValue> {
        let rows = events::js_to_cell_rows(data)?;
        self.view.borrow_mut().set_data(rows)?;
        Ok(())
    }

    /// First visible row index.
    pub fn current_index_y(&self) -> usize {
        self.view.borrow().current_index_y()
    }

    /// First visible column index.
    pub fn current_index_x(&self) -> usize {
        self.view.borrow().current_index_x()
    }

    /// Current dataset length (after truncation).
    pub fn data_len(&self) -> usize {
        self.view.borrow().data_len()
    }

    /// Uniform column count.
    pub fn column_count(&self) -> usize {
        self.view.borrow().column_count()
    }

    /// Maximum addressable row count.
    pub fn max_display_count_y(&self) -> usize {
        self.view.borrow().max_display_count_y()
    }

    /// Maximum addressable column count.
    pub fn max_display_count_x(&self) -> usize {
        self.view.borrow().max_display_count_x()
    }
}
