//! Controller configuration, merged over documented defaults.
//!
//! Replaces the ad hoc options-object merge of typical JS virtual-scroll
//! widgets with an explicit struct: on wasm the JS options object is
//! deserialized via `serde-wasm-bindgen`, natively it comes from JSON or
//! plain construction. The cell prototype and the update callback are not
//! part of this struct (they are not data); they are passed alongside.

use serde::Deserialize;

use crate::value::CellValue;

fn default_cell_extent() -> f64 {
    50.0
}

/// Recognized options for both list and grid controllers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollOptions {
    /// Initial dataset, row-major. Scalar rows for list mode, arrays for
    /// grid mode.
    pub data: Vec<serde_json::Value>,
    /// Pixel height of one cell.
    pub cell_height: f64,
    /// Pixel width of one cell (grid mode only).
    pub cell_width: f64,
    /// Mirror pool-size and index changes to the debug sink.
    pub debug: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        ScrollOptions {
            data: Vec::new(),
            cell_height: default_cell_extent(),
            cell_width: default_cell_extent(),
            debug: false,
        }
    }
}

impl ScrollOptions {
    /// The dataset as scalar rows (list mode). Arrays collapse to their
    /// first element; unsupported JSON shapes become `Null`.
    #[must_use]
    pub fn scalar_rows(&self) -> Vec<CellValue> {
        self.data.iter().map(json_to_value).collect()
    }

    /// The dataset as cell runs (grid mode). Scalar rows become
    /// single-cell runs.
    #[must_use]
    pub fn cell_rows(&self) -> Vec<Vec<CellValue>> {
        self.data
            .iter()
            .map(|row| match row {
                serde_json::Value::Array(cells) => cells.iter().map(json_to_value).collect(),
                other => vec![json_to_value(other)],
            })
            .collect()
    }
}

/// Convert one JSON scalar into a cell value.
#[must_use]
pub fn json_to_value(v: &serde_json::Value) -> CellValue {
    match v {
        serde_json::Value::Null => CellValue::Null,
        serde_json::Value::Bool(b) => CellValue::Bool(*b),
        serde_json::Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => CellValue::Text(s.clone()),
        serde_json::Value::Array(cells) => cells
            .first()
            .map_or(CellValue::Null, json_to_value),
        serde_json::Value::Object(_) => CellValue::Null,
    }
}
