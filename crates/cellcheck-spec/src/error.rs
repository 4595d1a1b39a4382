use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Index-addressed edit on a [`crate::VerificationCollection`] that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {index} is out of range ({len} verification record(s))")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised while reading, editing or writing a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index}: {reason}")]
    EditRejected { index: usize, reason: String },

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
