//! Description store.
//!
//! A flat JSON map from method name to a one-line summary, cached from the
//! node's reference documentation. Loaded once per run and never written.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::diagnostic::GeneratorError;

/// Read-only method name -> description lookup.
#[derive(Debug, Clone, Default)]
pub struct DescriptionStore {
    descriptions: HashMap<String, String>,
}

impl DescriptionStore {
    /// Loads the store from disk.
    ///
    /// A missing file is not an error: descriptions are enrichment only, so
    /// generation continues with an empty store.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        if !path.exists() {
            warn!(path = %path.display(), "Description store not found, generating without descriptions.");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, GeneratorError> {
        let descriptions: HashMap<String, String> =
            serde_json::from_str(content).map_err(|e| GeneratorError::DescriptionsParse {
                message: e.to_string(),
            })?;
        Ok(Self { descriptions })
    }

    /// Description for `method`, or an empty string on a miss.
    pub fn get(&self, method: &str) -> &str {
        self.descriptions.get(method).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

impl FromIterator<(String, String)> for DescriptionStore {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            descriptions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_miss_is_empty() {
        let store = DescriptionStore::from_json(r#"{ "uptime": "Returns the total uptime of the server." }"#)
            .unwrap();
        assert_eq!(store.get("uptime"), "Returns the total uptime of the server.");
        assert_eq!(store.get("getblock"), "");
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = DescriptionStore::load(&dir.path().join("descriptions.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("descriptions.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            DescriptionStore::load(&path),
            Err(GeneratorError::DescriptionsParse { .. })
        ));
    }
}
