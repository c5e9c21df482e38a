//! Rendering-surface seam.
//!
//! The viewport controllers are generic over a small display-tree trait so
//! the windowing logic runs identically against the real DOM (wasm32) and
//! the in-memory headless tree used by tests and the CLI.

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(not(target_arch = "wasm32"))]
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
#[cfg(not(target_arch = "wasm32"))]
pub use headless::{HeadlessNode, HeadlessSurface};

use crate::error::Result;

/// Attribute key tagging a pooled cell with its slot index.
pub const SLOT_ATTR: &str = "data-slot";
/// Attribute key tagging a pooled row container with its slot index.
pub const ROW_SLOT_ATTR: &str = "data-row-slot";

/// A display tree the controller can recycle cells on.
///
/// All operations take `&self`: both implementations use interior
/// mutability (the DOM inherently, the headless tree via `RefCell`), which
/// keeps the render pass free of split-borrow gymnastics.
pub trait Surface {
    /// Handle to one display node (a pooled cell or a row container).
    type Node: Clone;

    /// Clone the cell prototype into a fresh, detached node.
    fn create_cell(&self) -> Result<Self::Node>;

    /// Create a fresh, detached row container (grid mode).
    fn create_row(&self) -> Result<Self::Node>;

    /// Append `child` under `parent`, or under the root when `parent` is
    /// `None`. Appending is always at the tail; the pool never reorders.
    fn append(&self, parent: Option<&Self::Node>, child: &Self::Node);

    /// Detach `child` from `parent` (or the root).
    fn detach(&self, parent: Option<&Self::Node>, child: &Self::Node);

    /// Size the scrollable content box. `width` is `None` in list mode.
    fn set_content_extent(&self, width: Option<f64>, height: f64);

    /// Offset the recycled cells to their logical position via lead
    /// padding. `left` is `None` in list mode.
    fn set_lead_padding(&self, left: Option<f64>, top: f64);

    /// Write a node's text content (default update callback).
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Read a node's live text content (edit commit).
    fn text(&self, node: &Self::Node) -> String;

    /// Tag a node with its pool slot so events can be resolved back to it.
    fn tag_slot(&self, node: &Self::Node, key: &str, slot: usize);
}
