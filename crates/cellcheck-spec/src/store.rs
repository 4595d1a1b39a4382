use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::ConfigDocument;
use crate::error::ConfigError;

/// YAML file holding one [`ConfigDocument`].
///
/// Every write replaces the whole file with the canonical form. Concurrent
/// writers are not coordinated: the last save wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalize the document, creating a default file if none exists.
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let doc = ConfigDocument::from_yaml_str(&text)?;
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    path = %self.path.display(),
                    cells = doc.cells_to_verify.len(),
                    "loaded config"
                );
                Ok(doc)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                #[cfg(feature = "tracing")]
                tracing::info!(path = %self.path.display(), "config file missing; writing defaults");
                let doc = ConfigDocument::default();
                self.save(&doc)?;
                Ok(doc)
            }
            Err(source) => Err(ConfigError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the canonical YAML form of `doc`.
    pub fn save(&self, doc: &ConfigDocument) -> Result<(), ConfigError> {
        let yaml = doc.to_yaml()?;
        fs::write(&self.path, yaml).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            path = %self.path.display(),
            cells = doc.cells_to_verify.len(),
            "saved config"
        );
        Ok(())
    }

    /// Load, apply `edit`, and save, as one unit.
    ///
    /// Nothing is written when `edit` fails.
    pub fn update<T, F>(&self, edit: F) -> Result<T, ConfigError>
    where
        F: FnOnce(&mut ConfigDocument) -> Result<T, ConfigError>,
    {
        let mut doc = self.load()?;
        let out = edit(&mut doc)?;
        self.save(&doc)?;
        Ok(out)
    }
}
