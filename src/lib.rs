//! vscroll - virtual scrolling for very large datasets
//!
//! Renders an unbounded row/column dataset inside a fixed viewport by
//! materializing only the visible cells:
//! - A small fixed pool of display cells, recycled as the view scrolls
//! - Pool size tracks the viewport, never the data
//! - Render callback invoked only for cells whose backing value changed
//! - In-place edits commit back into the dataset on blur
//! - List (1-D) and grid (2-D) modes
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { VirtualScroll } from 'vscroll';
//! await init();
//! const scroller = new VirtualScroll(element, { data, cellHeight: 50 });
//! scroller.set_render_callback((cell, value, row) => { cell.textContent = value ?? ''; });
//! ```

pub mod debug;
pub mod error;
pub mod layout;
pub mod options;
pub mod pool;
pub mod store;
pub mod surface;
pub mod value;
pub mod viewer;

mod log;

pub use error::{Result, VscrollError};
pub use layout::{Axis, MAX_SCROLL_EXTENT};
pub use options::ScrollOptions;
pub use store::{Change, DataStore, Row};
pub use value::{coerce, CellValue, ValueType};
pub use viewer::{GridView, ScrollView};

#[cfg(target_arch = "wasm32")]
pub use viewer::grid::VirtualGrid;
#[cfg(target_arch = "wasm32")]
pub use viewer::VirtualScroll;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Get the library version
#[cfg(target_arch = "wasm32")]
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
