//! Conversion of a Sheets API v4 spreadsheet resource (fetched with
//! `includeGridData=true`) into a [`Snapshot`].
//!
//! Only the fields needed for the snapshot are modeled; everything else in
//! the response is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SnapshotError;
use crate::grid::{SheetGrid, Snapshot};
use crate::value::{CellValue, FormulaCell};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetResource {
    #[serde(default)]
    pub sheets: Vec<ApiSheet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSheet {
    #[serde(default)]
    pub properties: SheetProperties,
    #[serde(default)]
    pub data: Vec<GridData>,
    #[serde(default)]
    pub charts: Vec<EmbeddedChart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridData {
    #[serde(default)]
    pub row_data: Vec<RowData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowData {
    #[serde(default)]
    pub values: Vec<Option<ApiCell>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCell {
    #[serde(default)]
    pub user_entered_value: Option<ExtendedValue>,
    #[serde(default)]
    pub formatted_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedValue {
    #[serde(default)]
    pub formula_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedChart {
    #[serde(default)]
    pub chart_id: Option<Value>,
    #[serde(default)]
    pub spec: Option<Value>,
}

impl SpreadsheetResource {
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ApiCell {
    fn to_cell_value(&self) -> CellValue {
        let formula = self
            .user_entered_value
            .as_ref()
            .and_then(|v| v.formula_value.as_deref())
            .filter(|f| !f.is_empty());
        match (formula, self.formatted_value.as_deref()) {
            (Some(formula), value) => CellValue::Formula(FormulaCell {
                formula: formula.to_string(),
                value: value.map(str::to_string),
            }),
            (None, Some(value)) if !value.is_empty() => CellValue::text(value),
            (None, _) => CellValue::Empty,
        }
    }
}

impl EmbeddedChart {
    fn to_snapshot_value(&self) -> Value {
        let mut entry = Map::new();
        if let Some(id) = &self.chart_id {
            entry.insert("chartId".to_string(), id.clone());
        }
        if let Some(spec) = &self.spec {
            entry.insert("spec".to_string(), spec.clone());
        }
        Value::Object(entry)
    }
}

impl ApiSheet {
    fn to_grid(&self) -> SheetGrid {
        let rows = self
            .data
            .iter()
            .flat_map(|grid| grid.row_data.iter())
            .map(|row| {
                row.values
                    .iter()
                    .map(|cell| cell.as_ref().map_or(CellValue::Empty, ApiCell::to_cell_value))
                    .collect()
            })
            .collect();
        SheetGrid {
            rows,
            charts: self.charts.iter().map(EmbeddedChart::to_snapshot_value).collect(),
        }
    }
}

impl Snapshot {
    /// Build a snapshot from a parsed API resource, one sheet per API sheet.
    pub fn from_sheets_api(resource: &SpreadsheetResource) -> Snapshot {
        let snapshot: Snapshot = resource
            .sheets
            .iter()
            .map(|sheet| (sheet.properties.title.clone(), sheet.to_grid()))
            .collect();
        #[cfg(feature = "tracing")]
        if snapshot.is_empty() {
            tracing::warn!("sheets api response contains no sheets");
        } else {
            tracing::debug!(sheets = snapshot.len(), "converted sheets api response");
        }
        snapshot
    }

    /// Parse a raw API response body and convert it.
    pub fn from_sheets_api_json(json: &str) -> Result<Snapshot, SnapshotError> {
        SpreadsheetResource::from_json_str(json).map(|resource| Snapshot::from_sheets_api(&resource))
    }
}
