use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or select from a spreadsheet snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid spreadsheet JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no sheets found in the spreadsheet data")]
    NoSheets,
    #[error("sheet `{name}` not found (available: {})", .available.join(", "))]
    UnknownSheet { name: String, available: Vec<String> },
}
