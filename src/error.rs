//! Structured error types for vscroll.
//!
//! Used for construction and surface failures only; everything that can
//! degrade gracefully (truncation, coercion, absent rows) does so without
//! touching this channel.

/// All errors that can occur while building or driving a scroll view.
#[derive(Debug, thiserror::Error)]
pub enum VscrollError {
    /// Invalid configuration (non-positive cell extent, missing element).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rendering surface failure (detached node, DOM operation refused).
    #[error("Surface error: {0}")]
    Surface(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VscrollError>;

impl From<String> for VscrollError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for VscrollError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<VscrollError> for wasm_bindgen::JsValue {
    fn from(e: VscrollError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
