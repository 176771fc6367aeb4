//! Value formatting for grid display.
//!
//! Every [`RawValue`] maps to a [`FormattedCell`]. Formatting never fails:
//! values with no dedicated rule render as a `?type?` marker so one odd
//! column cannot take down the row.

use crate::backend::RawValue;

/// Horizontal placement of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Semantic category of a cell, used by front ends to pick a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTag {
    Header,
    Numeric,
    Plain,
    Temporal,
    Binary,
    NullMarker,
    Unknown,
}

/// A display-ready cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCell {
    pub text: String,
    pub alignment: Alignment,
    pub tag: CellTag,
}

impl FormattedCell {
    pub fn new(text: impl Into<String>, alignment: Alignment, tag: CellTag) -> Self {
        Self {
            text: text.into(),
            alignment,
            tag,
        }
    }

    /// A column header cell.
    pub fn header(name: &str) -> Self {
        Self::new(name, Alignment::Center, CellTag::Header)
    }
}

pub const NULL_MARKER: &str = "NULL";
const NIL_MARKER: &str = "?nil?";

/// Format one raw value for display.
pub fn format_value(value: &RawValue) -> FormattedCell {
    match value {
        RawValue::Integer(n) => {
            FormattedCell::new(n.to_string(), Alignment::Right, CellTag::Numeric)
        }
        RawValue::Float(f) => {
            FormattedCell::new(format!("{:.2}", f), Alignment::Right, CellTag::Numeric)
        }
        RawValue::Text(s) => FormattedCell::new(s.as_str(), Alignment::Left, CellTag::Plain),
        RawValue::DateTime(dt) => FormattedCell::new(
            dt.format("%Y-%m-%d").to_string(),
            Alignment::Right,
            CellTag::Temporal,
        ),
        // Blobs are shown as text, never as hex.
        RawValue::Bytes(bytes) => FormattedCell::new(
            String::from_utf8_lossy(bytes),
            Alignment::Right,
            CellTag::Binary,
        ),
        RawValue::Null => FormattedCell::new(NULL_MARKER, Alignment::Center, CellTag::NullMarker),
        RawValue::Unknown { type_name } => {
            let text = match type_name.as_deref() {
                Some(name) if !name.is_empty() => format!("?{}?", name),
                _ => NIL_MARKER.to_string(),
            };
            FormattedCell::new(text, Alignment::Left, CellTag::Unknown)
        }
    }
}
