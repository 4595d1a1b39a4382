use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// One cell of a snapshot row.
///
/// Snapshots store `null` for blank cells, the formatted display string for
/// plain cells, and `{formula, value}` for cells holding a formula. Any other
/// shape is kept verbatim in `Other` so one odd cell never fails a load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Formula(FormulaCell),
    Text(String),
    Number(Number),
    Bool(bool),
    Other(Value),
}

/// A written formula and its last evaluated display value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaCell {
    pub formula: String,
    #[serde(
        default,
        deserialize_with = "display_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
}

/// Evaluated values are display strings; hand-written snapshots may use bare
/// numbers or booleans instead.
fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Runtime type of a stored cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    String,
    Number,
    Boolean,
    Formula,
    Other,
}

impl CellKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Empty => "empty",
            CellKind::String => "string",
            CellKind::Number => "number",
            CellKind::Boolean => "boolean",
            CellKind::Formula => "formula",
            CellKind::Other => "other",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn formula(formula: impl Into<String>, value: impl Into<String>) -> Self {
        CellValue::Formula(FormulaCell {
            formula: formula.into(),
            value: Some(value.into()),
        })
    }

    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty => CellKind::Empty,
            CellValue::Formula(_) => CellKind::Formula,
            CellValue::Text(_) => CellKind::String,
            CellValue::Number(_) => CellKind::Number,
            CellValue::Bool(_) => CellKind::Boolean,
            CellValue::Other(_) => CellKind::Other,
        }
    }

    /// Blank for reporting purposes: `null` or the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_formula(&self) -> Option<&FormulaCell> {
        match self {
            CellValue::Formula(cell) => Some(cell),
            _ => None,
        }
    }
}

/// Display value: the scalar itself, or a formula's evaluated value.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Formula(cell) => f.write_str(cell.value.as_deref().unwrap_or_default()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Other(raw) => write!(f, "{raw}"),
        }
    }
}
