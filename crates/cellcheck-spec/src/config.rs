use std::collections::HashMap;
use std::str::FromStr;

use cellcheck_common::parse_cell_reference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collection::VerificationCollection;
use crate::record::{CanonicalRecord, RawRecord, VerificationKind, lenient_string};
use crate::sheet_url::is_spreadsheet_url;
use crate::validation::{ConfigIssue, ValidationError};

/// The document edited by users: a spreadsheet URL plus the cells to verify.
///
/// Records are normalized when the document is read and canonicalized when
/// it is written; in between they keep both payload slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    pub spreadsheet_url: String,
    pub cells_to_verify: VerificationCollection,
}

/// Stored document shape before normalization.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(rename = "spreadsheetURL", default, deserialize_with = "lenient_string")]
    spreadsheet_url: Option<String>,
    #[serde(rename = "cellsToVerify", default)]
    cells_to_verify: Option<Vec<RawRecord>>,
}

/// Persisted document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[schemars(
    title = "cellcheck configuration",
    description = "Spreadsheet URL and the ordered list of cells whose value or formula is verified."
)]
pub struct CanonicalConfig {
    /// Google Sheets document URL.
    #[serde(rename = "spreadsheetURL")]
    pub spreadsheet_url: String,
    /// Ordered verification records, each with exactly one expectation.
    #[serde(rename = "cellsToVerify")]
    pub cells_to_verify: Vec<CanonicalRecord>,
}

impl ConfigDocument {
    fn from_raw(raw: Option<RawConfig>) -> Self {
        let raw = raw.unwrap_or_default();
        Self {
            spreadsheet_url: raw.spreadsheet_url.unwrap_or_default(),
            cells_to_verify: VerificationCollection::from_raw(
                raw.cells_to_verify.unwrap_or_default(),
            ),
        }
    }

    /// Parse a YAML document. Empty or `null` input yields the default document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<Option<RawConfig>>(yaml).map(Self::from_raw)
    }

    /// Parse a JSON document. `null` yields the default document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Option<RawConfig>>(json).map(Self::from_raw)
    }

    /// Canonical projection applied to every record.
    pub fn canonical(&self) -> CanonicalConfig {
        CanonicalConfig {
            spreadsheet_url: self.spreadsheet_url.clone(),
            cells_to_verify: self.cells_to_verify.canonicalize(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.canonical())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.canonical())
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.canonical())
    }

    /// Check the document and report every issue found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if !self.spreadsheet_url.is_empty() && !is_spreadsheet_url(&self.spreadsheet_url) {
            issues.push(ConfigIssue::new(
                "spreadsheetURL",
                "expected a Google Sheets URL containing `/spreadsheets/d/<id>`",
            ));
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for (idx, record) in self.cells_to_verify.iter().enumerate() {
            let path = format!("cellsToVerify[{idx}].cellName");
            if record.cell_name.is_empty() {
                issues.push(ConfigIssue::new(&path, "cell name is empty"));
            } else if let Err(err) = parse_cell_reference(&record.cell_name) {
                issues.push(ConfigIssue::new(&path, err.to_string()));
            } else if let Some(first) = seen.get(&record.cell_name.to_ascii_uppercase()) {
                issues.push(ConfigIssue::new(
                    &path,
                    format!(
                        "duplicate cell `{}` (already checked by cellsToVerify[{first}])",
                        record.cell_name
                    ),
                ));
            } else {
                seen.insert(record.cell_name.to_ascii_uppercase(), idx);
            }

            if record.kind == VerificationKind::Function && !record.expected_function.starts_with('=')
            {
                issues.push(ConfigIssue::new(
                    format!("cellsToVerify[{idx}].expectedFunction"),
                    "expected function must start with `=`",
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

impl FromStr for ConfigDocument {
    type Err = serde_yaml::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigDocument::from_yaml_str(s)
    }
}
