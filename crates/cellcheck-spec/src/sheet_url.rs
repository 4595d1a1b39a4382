//! Helpers for Google Sheets document URLs.

use once_cell::sync::Lazy;
use regex::Regex;

static SPREADSHEET_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("spreadsheet path regex must compile")
});
static SHORT_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("short path regex must compile"));
static GID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[#&]gid=([0-9]+)").expect("gid regex must compile"));

const EDIT_BASE: &str = "https://docs.google.com/spreadsheets/d";

/// Whether `url` points at a spreadsheet document (`/spreadsheets/d/<id>`).
pub fn is_spreadsheet_url(url: &str) -> bool {
    SPREADSHEET_PATH.is_match(url)
}

/// Document id from `/spreadsheets/d/<id>`, falling back to `/d/<id>`.
pub fn spreadsheet_id(url: &str) -> Option<&str> {
    SPREADSHEET_PATH
        .captures(url)
        .or_else(|| SHORT_PATH.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Sheet tab id from a `#gid=` or `&gid=` fragment.
pub fn sheet_gid(url: &str) -> Option<&str> {
    GID.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Edit URL suitable for embedding a preview with headers visible.
///
/// Empty input yields an empty string; a URL without a spreadsheet path is
/// returned unchanged.
pub fn embed_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let Some(id) = SPREADSHEET_PATH
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    else {
        return url.to_string();
    };

    let mut params = Vec::with_capacity(2);
    if let Some(gid) = sheet_gid(url) {
        params.push(format!("gid={gid}"));
    }
    params.push("rm=minimal".to_string());
    format!("{EDIT_BASE}/{id}/edit?{}", params.join("&"))
}
