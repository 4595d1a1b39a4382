use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SnapshotError;
use crate::value::CellValue;

/// Row-major cells of one sheet plus its opaque chart descriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetGrid {
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
    #[serde(default)]
    pub charts: Vec<serde_json::Value>,
}

impl SheetGrid {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            rows,
            charts: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Sheets of a spreadsheet keyed by title, in document order.
///
/// The first sheet is the default target for lookups. A repeated title keeps
/// its first position and the last grid, matching how JSON objects are
/// commonly read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    sheets: Vec<(String, SheetGrid)>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot document. A document without sheets is rejected.
    pub fn from_json_str(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.non_empty()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        snapshot.non_empty()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&text)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), sheets = snapshot.len(), "loaded snapshot");
        Ok(snapshot)
    }

    fn non_empty(self) -> Result<Self, SnapshotError> {
        if self.sheets.is_empty() {
            Err(SnapshotError::NoSheets)
        } else {
            Ok(self)
        }
    }

    /// Add or replace a sheet. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, grid: SheetGrid) {
        let name = name.into();
        match self.sheets.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = grid,
            None => self.sheets.push((name, grid)),
        }
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SheetGrid)> {
        self.sheets.iter().map(|(name, grid)| (name.as_str(), grid))
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, grid)| grid)
    }

    pub fn first(&self) -> Option<(&str, &SheetGrid)> {
        self.sheets.first().map(|(name, grid)| (name.as_str(), grid))
    }

    /// Resolve the sheet to read: `name` when given, otherwise the first one.
    pub fn select(&self, name: Option<&str>) -> Result<(&str, &SheetGrid), SnapshotError> {
        match name {
            None => self.first().ok_or(SnapshotError::NoSheets),
            Some(name) => self
                .sheets
                .iter()
                .find(|(existing, _)| existing == name)
                .map(|(name, grid)| (name.as_str(), grid))
                .ok_or_else(|| SnapshotError::UnknownSheet {
                    name: name.to_string(),
                    available: self.sheet_names().map(str::to_string).collect(),
                }),
        }
    }

    /// Two-space indented JSON, the on-disk snapshot form.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<(String, SheetGrid)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, SheetGrid)>>(iter: T) -> Self {
        let mut snapshot = Snapshot::new();
        for (name, grid) in iter {
            snapshot.insert(name, grid);
        }
        snapshot
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for (name, grid) in &self.sheets {
            map.serialize_entry(name, grid)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping sheet names to sheet data")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut snapshot = Snapshot::new();
                while let Some((name, grid)) = access.next_entry::<String, SheetGrid>()? {
                    snapshot.insert(name, grid);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}
