//! Scalar cell values and edit coercion.
//!
//! Values are untyped at the model level but carry a runtime type tag used
//! when an edited cell's text is written back into the data store.

use serde::{Deserialize, Serialize};

/// A single scalar held by the dataset.
///
/// `Null` doubles as the sentinel rendered into pool slots that overscroll
/// past the end of the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent / beyond the end of the data.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar (f64, like the host environment's numbers).
    Number(f64),
    /// Text scalar.
    Text(String),
}

/// Runtime type tag recorded per rendered cell, driving edit coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Coerce edits by identity.
    Text,
    /// Coerce edits via numeric parse (NaN on failure).
    Number,
    /// Coerce edits via non-empty-string truthiness.
    Boolean,
}

impl CellValue {
    /// The type tag for this value. `Null` coerces like text.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            CellValue::Bool(_) => ValueType::Boolean,
            CellValue::Number(_) => ValueType::Number,
            CellValue::Null | CellValue::Text(_) => ValueType::Text,
        }
    }

    /// Text form written into a cell by the default update callback.
    ///
    /// `Null` renders the empty string; numbers drop a trailing `.0` so
    /// integral values round-trip through an edit unchanged.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }

    /// True for the `Null` sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Coerce edited cell text back into a value per the cell's recorded tag.
///
/// There is no validation layer: a failed numeric parse degrades to NaN,
/// and booleans follow non-empty-string truthiness.
#[must_use]
pub fn coerce(text: &str, tag: ValueType) -> CellValue {
    match tag {
        ValueType::Text => CellValue::Text(text.to_string()),
        ValueType::Number => CellValue::Number(text.trim().parse::<f64>().unwrap_or(f64::NAN)),
        ValueType::Boolean => CellValue::Bool(!text.is_empty()),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(CellValue::Number(42.0).display(), "42");
        assert_eq!(CellValue::Number(1.5).display(), "1.5");
    }

    #[test]
    fn null_displays_empty() {
        assert_eq!(CellValue::Null.display(), "");
    }

    #[test]
    fn coerce_number_parse_failure_is_nan() {
        let CellValue::Number(n) = coerce("not a number", ValueType::Number) else {
            panic!("expected number");
        };
        assert!(n.is_nan());
    }

    #[test]
    fn coerce_boolean_is_truthiness() {
        assert_eq!(coerce("", ValueType::Boolean), CellValue::Bool(false));
        assert_eq!(coerce("false", ValueType::Boolean), CellValue::Bool(true));
    }
}
