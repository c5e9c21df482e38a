//! In-memory surface for native tests and the CLI.
//!
//! Records the same observable effects the DOM surface would produce:
//! child order, node text, slot tags, content extents and lead padding.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::Surface;
use crate::error::Result;

#[derive(Debug, Default)]
struct NodeData {
    text: String,
    tags: BTreeMap<String, usize>,
    children: Vec<HeadlessNode>,
}

/// A node in the headless display tree.
#[derive(Debug, Clone, Default)]
pub struct HeadlessNode(Rc<RefCell<NodeData>>);

impl HeadlessNode {
    fn new() -> Self {
        HeadlessNode(Rc::new(RefCell::new(NodeData::default())))
    }

    /// The node's current text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    /// Overwrite the node's text, as an "editor" would before a commit.
    pub fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    /// The slot tag stored under `key`, if any.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<usize> {
        self.0.borrow().tags.get(key).copied()
    }

    /// Number of children attached to this node.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// The child at `index`, if present.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<HeadlessNode> {
        self.0.borrow().children.get(index).cloned()
    }

    fn same(&self, other: &HeadlessNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    content_width: Option<f64>,
    content_height: f64,
    padding_left: Option<f64>,
    padding_top: f64,
}

/// Headless display tree with a root node and recorded box metrics.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    root: HeadlessNode,
    state: RefCell<SurfaceState>,
}

impl HeadlessSurface {
    /// Fresh, empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root node the pool is appended to.
    #[must_use]
    pub fn root(&self) -> &HeadlessNode {
        &self.root
    }

    /// Last content height set by the controller.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.state.borrow().content_height
    }

    /// Last content width set by the controller (grid mode).
    #[must_use]
    pub fn content_width(&self) -> Option<f64> {
        self.state.borrow().content_width
    }

    /// Last lead padding (top) set by the controller.
    #[must_use]
    pub fn padding_top(&self) -> f64 {
        self.state.borrow().padding_top
    }

    /// Last lead padding (left) set by the controller (grid mode).
    #[must_use]
    pub fn padding_left(&self) -> Option<f64> {
        self.state.borrow().padding_left
    }
}

impl Surface for HeadlessSurface {
    type Node = HeadlessNode;

    fn create_cell(&self) -> Result<Self::Node> {
        Ok(HeadlessNode::new())
    }

    fn create_row(&self) -> Result<Self::Node> {
        Ok(HeadlessNode::new())
    }

    fn append(&self, parent: Option<&Self::Node>, child: &Self::Node) {
        let target = parent.unwrap_or(&self.root);
        target.0.borrow_mut().children.push(child.clone());
    }

    fn detach(&self, parent: Option<&Self::Node>, child: &Self::Node) {
        let target = parent.unwrap_or(&self.root);
        let mut data = target.0.borrow_mut();
        data.children.retain(|c| !c.same(child));
    }

    fn set_content_extent(&self, width: Option<f64>, height: f64) {
        let mut state = self.state.borrow_mut();
        state.content_height = height;
        if width.is_some() {
            state.content_width = width;
        }
    }

    fn set_lead_padding(&self, left: Option<f64>, top: f64) {
        let mut state = self.state.borrow_mut();
        state.padding_top = top;
        if left.is_some() {
            state.padding_left = left;
        }
    }

    fn set_text(&self, node: &Self::Node, text: &str) {
        node.set_text(text);
    }

    fn text(&self, node: &Self::Node) -> String {
        node.text()
    }

    fn tag_slot(&self, node: &Self::Node, key: &str, slot: usize) {
        node.0.borrow_mut().tags.insert(key.to_string(), slot);
    }
}
