//! DOM-backed surface (wasm32 only).
//!
//! Wraps the root element, its scrollable parent, and the cell prototype.
//! Applies the same construction-time styling the scroll container needs:
//! the parent scrolls, the root hides overflow and uses border-box sizing
//! so lead padding does not widen the content box.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::Surface;
use crate::error::{Result, VscrollError};

/// The real display tree: a scrollable parent and a root element that the
/// pooled cells are appended to.
pub struct DomSurface {
    root: HtmlElement,
    scroll_parent: HtmlElement,
    cell_prototype: Element,
}

impl DomSurface {
    /// Bind to `root` and its scrollable parent element.
    ///
    /// `cell_prototype` is cloned per pool slot; when `None`, a bare
    /// `<div>` is used.
    ///
    /// # Errors
    /// Fails when `root` has no parent element (nothing to scroll) or the
    /// default prototype cannot be created.
    pub fn new(root: HtmlElement, cell_prototype: Option<Element>) -> Result<Self> {
        let scroll_parent = root
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| {
                VscrollError::Surface("root element has no scrollable parent".into())
            })?;

        let cell_prototype = match cell_prototype {
            Some(proto) => proto,
            None => Self::default_prototype()?,
        };

        let _ = root.style().set_property("box-sizing", "border-box");
        let _ = root.style().set_property("overflow", "hidden");
        let _ = scroll_parent.style().set_property("overflow", "scroll");

        Ok(DomSurface {
            root,
            scroll_parent,
            cell_prototype,
        })
    }

    fn default_prototype() -> Result<Element> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| VscrollError::Surface("no document".into()))?;
        document
            .create_element("div")
            .map_err(|_| VscrollError::Surface("failed to create default cell".into()))
    }

    /// The root element the pool lives under.
    #[must_use]
    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    /// Current vertical scroll offset of the parent, in pixels.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        f64::from(self.scroll_parent.scroll_top())
    }

    /// Current horizontal scroll offset of the parent, in pixels.
    #[must_use]
    pub fn scroll_left(&self) -> f64 {
        f64::from(self.scroll_parent.scroll_left())
    }

    /// Visible height of the scroll parent, in pixels.
    #[must_use]
    pub fn client_height(&self) -> f64 {
        f64::from(self.scroll_parent.client_height())
    }

    /// Visible width of the scroll parent, in pixels.
    #[must_use]
    pub fn client_width(&self) -> f64 {
        f64::from(self.scroll_parent.client_width())
    }

    /// The scrollable parent, for event wiring.
    #[must_use]
    pub fn scroll_parent(&self) -> &HtmlElement {
        &self.scroll_parent
    }
}

impl Surface for DomSurface {
    type Node = Element;

    fn create_cell(&self) -> Result<Self::Node> {
        self.cell_prototype
            .clone_node()
            .ok()
            .and_then(|n| n.dyn_into::<Element>().ok())
            .ok_or_else(|| VscrollError::Surface("failed to clone cell prototype".into()))
    }

    fn create_row(&self) -> Result<Self::Node> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| VscrollError::Surface("no document".into()))?;
        document
            .create_element("div")
            .map_err(|_| VscrollError::Surface("failed to create row container".into()))
    }

    fn append(&self, parent: Option<&Self::Node>, child: &Self::Node) {
        let target: &Element = parent.unwrap_or_else(|| self.root.as_ref());
        let _ = target.append_child(child);
    }

    fn detach(&self, parent: Option<&Self::Node>, child: &Self::Node) {
        let target: &Element = parent.unwrap_or_else(|| self.root.as_ref());
        let _ = target.remove_child(child);
    }

    fn set_content_extent(&self, width: Option<f64>, height: f64) {
        let style = self.root.style();
        let _ = style.set_property("height", &format!("{height}px"));
        if let Some(width) = width {
            let _ = style.set_property("width", &format!("{width}px"));
        }
    }

    fn set_lead_padding(&self, left: Option<f64>, top: f64) {
        let style = self.root.style();
        let _ = style.set_property("padding-top", &format!("{top}px"));
        if let Some(left) = left {
            let _ = style.set_property("padding-left", &format!("{left}px"));
        }
    }

    fn set_text(&self, node: &Self::Node, text: &str) {
        node.set_text_content(Some(text));
    }

    fn text(&self, node: &Self::Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn tag_slot(&self, node: &Self::Node, key: &str, slot: usize) {
        let _ = node.set_attribute(key, &slot.to_string());
    }
}
