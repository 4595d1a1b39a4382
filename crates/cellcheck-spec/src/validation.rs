use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single problem found in a config document, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub path: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every issue found by [`crate::ConfigDocument::validate`], in document order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
    issues: Vec<ConfigIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ConfigIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ConfigIssue> {
        self.issues
    }
}
