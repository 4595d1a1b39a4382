//! Verification record model for cellcheck configs.
//!
//! A config names a spreadsheet and lists cells whose displayed value or
//! written formula must match an expectation. This crate owns the in-memory
//! model of those records, the load-time normalization and save-time
//! canonicalization rules, document validation, and a small YAML file store.

mod collection;
mod config;
mod error;
mod record;
pub mod sheet_url;
mod store;
mod validation;

pub use collection::VerificationCollection;
pub use config::{CanonicalConfig, ConfigDocument};
pub use error::{CollectionError, ConfigError};
pub use record::{
    CanonicalRecord, Expectation, RawRecord, RecordField, VerificationKind, VerificationRecord,
};
pub use store::ConfigStore;
pub use validation::{ConfigIssue, ValidationError};

/// JSON Schema of the persisted document as a `serde_json::Value`.
pub fn generate_schema_value() -> serde_json::Value {
    let schema = schemars::schema_for!(CanonicalConfig);
    serde_json::to_value(schema).expect("schema serializes to JSON")
}

/// JSON Schema of the persisted document, pretty-printed.
pub fn generate_schema_json_pretty() -> String {
    serde_json::to_string_pretty(&generate_schema_value()).expect("schema serializes to JSON")
}
