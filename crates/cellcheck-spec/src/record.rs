use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// Which payload of a [`VerificationRecord`] is being checked.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum VerificationKind {
    /// Compare the cell's displayed value with `expectedValue`.
    #[default]
    #[serde(alias = "Value")]
    Value,
    /// Compare the cell's written formula with `expectedFunction`.
    #[serde(alias = "Function")]
    Function,
}

impl VerificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationKind::Value => "value",
            VerificationKind::Function => "function",
        }
    }

    /// Backward-compatible guess for records stored without a kind.
    fn infer(expected_function: Option<&str>) -> Self {
        match expected_function {
            Some(text) if !text.is_empty() => VerificationKind::Function,
            _ => VerificationKind::Value,
        }
    }
}

impl fmt::Display for VerificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" => Ok(VerificationKind::Value),
            "function" => Ok(VerificationKind::Function),
            other => Err(format!(
                "unknown verification kind `{other}` (expected `value` or `function`)"
            )),
        }
    }
}

/// Editable text fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    CellName,
    ExpectedValue,
    ExpectedFunction,
}

impl RecordField {
    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::CellName => "cellName",
            RecordField::ExpectedValue => "expectedValue",
            RecordField::ExpectedFunction => "expectedFunction",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cellName" | "cell-name" | "cell_name" => Ok(RecordField::CellName),
            "expectedValue" | "expected-value" | "expected_value" => Ok(RecordField::ExpectedValue),
            "expectedFunction" | "expected-function" | "expected_function" => {
                Ok(RecordField::ExpectedFunction)
            }
            other => Err(format!("unknown record field `{other}`")),
        }
    }
}

/// A record as it may appear in storage, before normalization.
///
/// Every field is optional. Payloads written as bare YAML scalars
/// (`expectedValue: 10`) are read as their text rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cell_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_value: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub expected_function: Option<String>,
    #[serde(
        default,
        alias = "verificationType",
        skip_serializing_if = "Option::is_none"
    )]
    pub verification_kind: Option<VerificationKind>,
}

/// One configured expectation on a spreadsheet cell.
///
/// Both payload slots are kept so that switching `kind` back and forth never
/// loses text; only the active one is ever serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationRecord {
    pub cell_name: String,
    pub kind: VerificationKind,
    pub expected_value: String,
    pub expected_function: String,
}

impl VerificationRecord {
    pub fn value(cell_name: impl Into<String>, expected_value: impl Into<String>) -> Self {
        Self {
            cell_name: cell_name.into(),
            kind: VerificationKind::Value,
            expected_value: expected_value.into(),
            expected_function: String::new(),
        }
    }

    pub fn function(cell_name: impl Into<String>, expected_function: impl Into<String>) -> Self {
        Self {
            cell_name: cell_name.into(),
            kind: VerificationKind::Function,
            expected_value: String::new(),
            expected_function: expected_function.into(),
        }
    }

    /// Build a record from stored data.
    ///
    /// The kind is inferred only when the stored record has none; an explicit
    /// kind is kept even if the payloads disagree with it.
    pub fn normalize(raw: RawRecord) -> Self {
        let kind = raw
            .verification_kind
            .unwrap_or_else(|| VerificationKind::infer(raw.expected_function.as_deref()));
        Self {
            cell_name: raw.cell_name.unwrap_or_default(),
            kind,
            expected_value: raw.expected_value.unwrap_or_default(),
            expected_function: raw.expected_function.unwrap_or_default(),
        }
    }

    /// Project to the persisted shape carrying only the active payload.
    pub fn canonicalize(&self) -> CanonicalRecord {
        let expectation = match self.kind {
            VerificationKind::Value => Expectation::ExpectedValue(self.expected_value.clone()),
            VerificationKind::Function => {
                Expectation::ExpectedFunction(self.expected_function.clone())
            }
        };
        CanonicalRecord {
            cell_name: self.cell_name.clone(),
            expectation,
        }
    }

    /// Switch the active payload. The inactive payload keeps its text.
    pub fn set_kind(&mut self, kind: VerificationKind) {
        self.kind = kind;
    }

    pub fn with_kind(mut self, kind: VerificationKind) -> Self {
        self.set_kind(kind);
        self
    }

    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::CellName => &self.cell_name,
            RecordField::ExpectedValue => &self.expected_value,
            RecordField::ExpectedFunction => &self.expected_function,
        }
    }

    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        let slot = match field {
            RecordField::CellName => &mut self.cell_name,
            RecordField::ExpectedValue => &mut self.expected_value,
            RecordField::ExpectedFunction => &mut self.expected_function,
        };
        *slot = value.into();
    }

    /// The field selected by `kind`.
    pub fn active_field(&self) -> RecordField {
        match self.kind {
            VerificationKind::Value => RecordField::ExpectedValue,
            VerificationKind::Function => RecordField::ExpectedFunction,
        }
    }

    pub fn active_payload(&self) -> &str {
        self.field(self.active_field())
    }

    /// Whether the canonical form reloads with the same kind.
    ///
    /// A function check without a formula is stored with an empty
    /// `expectedFunction`, which normalization reads back as a value check.
    pub fn survives_reload(&self) -> bool {
        self.kind == VerificationKind::Value || !self.expected_function.is_empty()
    }
}

impl From<RawRecord> for VerificationRecord {
    fn from(raw: RawRecord) -> Self {
        VerificationRecord::normalize(raw)
    }
}

/// Full in-memory form, with an explicit kind and both payloads.
impl From<VerificationRecord> for RawRecord {
    fn from(record: VerificationRecord) -> Self {
        RawRecord {
            cell_name: Some(record.cell_name),
            expected_value: Some(record.expected_value),
            expected_function: Some(record.expected_function),
            verification_kind: Some(record.kind),
        }
    }
}

/// Persisted form of a record: the cell name and exactly one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CanonicalRecord {
    #[serde(rename = "cellName")]
    pub cell_name: String,
    #[serde(flatten)]
    pub expectation: Expectation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Expectation {
    ExpectedValue(String),
    ExpectedFunction(String),
}

impl Expectation {
    pub fn kind(&self) -> VerificationKind {
        match self {
            Expectation::ExpectedValue(_) => VerificationKind::Value,
            Expectation::ExpectedFunction(_) => VerificationKind::Function,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Expectation::ExpectedValue(text) | Expectation::ExpectedFunction(text) => text,
        }
    }
}

/// Scalars accepted where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientScalar {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<LenientScalar> for String {
    fn from(value: LenientScalar) -> Self {
        match value {
            LenientScalar::Text(s) => s,
            LenientScalar::Bool(b) => b.to_string(),
            LenientScalar::Int(i) => i.to_string(),
            LenientScalar::UInt(u) => u.to_string(),
            LenientScalar::Float(f) => f.to_string(),
        }
    }
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LenientScalar>::deserialize(deserializer)?.map(String::from))
}
