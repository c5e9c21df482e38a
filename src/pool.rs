//! Fixed pools of recycled display cells.
//!
//! Pool size tracks the viewport extent, never the data size: growing
//! creates and attaches nodes at the tail, shrinking detaches from the
//! tail, and existing cells are never reordered. Each slot carries the
//! metadata side-table entry used for change detection and for resolving
//! an edit back to its dataset coordinate.

use crate::error::Result;
use crate::surface::{Surface, ROW_SLOT_ATTR, SLOT_ATTR};
use crate::value::{CellValue, ValueType};

/// Per-slot metadata: the binding and last-rendered state of one cell.
#[derive(Debug, Clone)]
pub struct CellMeta {
    /// Dataset row this slot currently represents.
    pub bound_row: Option<usize>,
    /// Dataset column this slot currently represents (grid mode).
    pub bound_col: Option<usize>,
    /// Value rendered on the last pass; `None` means never rendered, so
    /// the first pass always invokes the update callback.
    pub last_value: Option<CellValue>,
    /// Type tag of the last rendered value, driving edit coercion.
    pub last_type: ValueType,
}

impl Default for CellMeta {
    fn default() -> Self {
        CellMeta {
            bound_row: None,
            bound_col: None,
            last_value: None,
            last_type: ValueType::Text,
        }
    }
}

/// One pooled display cell: a surface node plus its metadata entry.
#[derive(Debug)]
pub struct PooledCell<N> {
    /// The display node, stable for the life of the slot.
    pub node: N,
    /// Change-detection and binding metadata.
    pub meta: CellMeta,
}

/// A fixed, resizable pool of display cells.
#[derive(Debug, Default)]
pub struct CellPool<N> {
    cells: Vec<PooledCell<N>>,
}

impl<N> CellPool<N> {
    /// Empty pool.
    #[must_use]
    pub fn new() -> Self {
        CellPool { cells: Vec::new() }
    }

    /// Current pool size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cells are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&PooledCell<N>> {
        self.cells.get(slot)
    }

    /// Mutable access to the cell at `slot`.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut PooledCell<N>> {
        self.cells.get_mut(slot)
    }

    /// Iterate slots in order.
    pub fn iter(&self) -> impl Iterator<Item = &PooledCell<N>> {
        self.cells.iter()
    }

    /// Iterate slots in order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PooledCell<N>> {
        self.cells.iter_mut()
    }

    /// Grow or shrink to exactly `target` cells.
    ///
    /// New nodes are cloned from the surface prototype, tagged with their
    /// slot, and attached immediately; shrinking detaches from the tail.
    pub fn resize<S>(&mut self, surface: &S, parent: Option<&N>, target: usize) -> Result<()>
    where
        S: Surface<Node = N>,
    {
        while self.cells.len() < target {
            let node = surface.create_cell()?;
            surface.tag_slot(&node, SLOT_ATTR, self.cells.len());
            surface.append(parent, &node);
            self.cells.push(PooledCell {
                node,
                meta: CellMeta::default(),
            });
        }
        while self.cells.len() > target {
            if let Some(cell) = self.cells.pop() {
                surface.detach(parent, &cell.node);
            }
        }
        Ok(())
    }
}

/// One pooled row container (grid mode): a container node owning an inner
/// cell pool.
#[derive(Debug)]
pub struct PooledRow<N> {
    /// The row container node.
    pub node: N,
    /// The row's horizontal cell pool.
    pub cells: CellPool<N>,
}

/// The outer pool of row containers.
#[derive(Debug, Default)]
pub struct RowPool<N> {
    rows: Vec<PooledRow<N>>,
}

impl<N: Clone> RowPool<N> {
    /// Empty row pool.
    #[must_use]
    pub fn new() -> Self {
        RowPool { rows: Vec::new() }
    }

    /// Current number of pooled rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows are pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `slot`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&PooledRow<N>> {
        self.rows.get(slot)
    }

    /// Mutable access to the row at `slot`.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut PooledRow<N>> {
        self.rows.get_mut(slot)
    }

    /// Iterate rows in order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PooledRow<N>> {
        self.rows.iter_mut()
    }

    /// Horizontal pool size (uniform across rows; 0 when empty).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }

    /// Resize the vertical pool to `target_rows` rows of `cols` cells.
    ///
    /// A freshly grown row container is populated to the current
    /// horizontal count before it is usable.
    pub fn resize_rows<S>(&mut self, surface: &S, target_rows: usize, cols: usize) -> Result<()>
    where
        S: Surface<Node = N>,
    {
        while self.rows.len() < target_rows {
            let node = surface.create_row()?;
            surface.tag_slot(&node, ROW_SLOT_ATTR, self.rows.len());
            surface.append(None, &node);
            let mut cells = CellPool::new();
            cells.resize(surface, Some(&node), cols)?;
            self.rows.push(PooledRow { node, cells });
        }
        while self.rows.len() > target_rows {
            if let Some(row) = self.rows.pop() {
                surface.detach(None, &row.node);
            }
        }
        Ok(())
    }

    /// Resize every row's horizontal pool to `target_cols` cells.
    pub fn resize_cols<S>(&mut self, surface: &S, target_cols: usize) -> Result<()>
    where
        S: Surface<Node = N>,
    {
        for row in &mut self.rows {
            let parent = row.node.clone();
            row.cells.resize(surface, Some(&parent), target_cols)?;
        }
        Ok(())
    }
}
