//! Debug sink: a live name/value readout of the controller's internals.
//!
//! On wasm32 this is a `<dl id="debug">` appended to the document body,
//! one `dt`/`dd` pair per variable keyed by a `data-variable` attribute.
//! Natively it is an insertion-ordered list with a snapshot accessor so
//! tests can assert what was mirrored.

#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;

#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element};

/// Named-value debug readout. Absent names are added on first appearance.
pub struct DebugBox {
    #[cfg(target_arch = "wasm32")]
    list: Option<Element>,
    #[cfg(target_arch = "wasm32")]
    values: HashMap<String, Element>,

    #[cfg(not(target_arch = "wasm32"))]
    entries: Vec<(String, String)>,
}

impl DebugBox {
    /// Create the readout, seeding it with `initial` pairs.
    #[must_use]
    pub fn new(initial: &[(&str, String)]) -> Self {
        let mut debug_box = Self::empty();
        debug_box.update(initial);
        debug_box
    }

    /// Upsert the given pairs; unknown names are appended.
    pub fn update(&mut self, entries: &[(&str, String)]) {
        for (name, value) in entries {
            self.upsert(name, value);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn empty() -> Self {
        let list = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|document| Self::create_list(&document));
        DebugBox {
            list,
            values: HashMap::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn create_list(document: &Document) -> Option<Element> {
        let dl = document.create_element("dl").ok()?;
        let _ = dl.set_attribute("id", "debug");
        document.body()?.append_child(&dl).ok()?;
        Some(dl)
    }

    #[cfg(target_arch = "wasm32")]
    fn upsert(&mut self, name: &str, value: &str) {
        if let Some(dd) = self.values.get(name) {
            dd.set_text_content(Some(value));
            return;
        }
        let Some(list) = self.list.as_ref() else {
            return;
        };
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let (Ok(dt), Ok(dd)) = (document.create_element("dt"), document.create_element("dd"))
        else {
            return;
        };
        let _ = dt.set_attribute("data-variable", name);
        dt.set_text_content(Some(name));
        let _ = dd.set_attribute("data-variable", name);
        dd.set_text_content(Some(value));
        let _ = list.append_child(&dt);
        let _ = list.append_child(&dd);
        self.values.insert(name.to_string(), dd);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn empty() -> Self {
        DebugBox {
            entries: Vec::new(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn upsert(&mut self, name: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((name.to_string(), value.to_string()));
        }
    }

    /// The current readout in insertion order (native only).
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn snapshot(&self) -> &[(String, String)] {
        &self.entries
    }

    /// The current value of `name`, if it has appeared (native only).
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
