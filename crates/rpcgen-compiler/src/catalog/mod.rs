//! Method catalog model.
//!
//! The catalog is a JSON document keyed by category name; each category holds
//! an ordered list of entries:
//!
//! ```json
//! {
//!   "blockchain": [
//!     { "name": "getblockcount", "params": [], "result": { "": "number" } }
//!   ]
//! }
//! ```
//!
//! Categories are kept in document order and entries in list order. That
//! double ordering is what makes generation deterministic.

mod entry;

pub use entry::{CatalogEntry, Param, OPTIONAL_MARKER};

use std::collections::HashMap;
use std::path::Path;

use crate::diagnostic::GeneratorError;

/// A named group of catalog entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

/// The full RPC surface, grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Loads a catalog from disk.
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parses a catalog document.
    ///
    /// Only the structure is checked here. Result shapes and type expressions
    /// are validated per entry during generation.
    pub fn from_json(content: &str) -> Result<Self, GeneratorError> {
        let document: serde_json::Value =
            serde_json::from_str(content).map_err(|e| GeneratorError::CatalogParse {
                message: e.to_string(),
            })?;

        let serde_json::Value::Object(map) = document else {
            return Err(GeneratorError::CatalogParse {
                message: "top level must be an object of categories".to_string(),
            });
        };

        let mut categories = Vec::with_capacity(map.len());
        for (name, value) in map {
            let entries: Vec<CatalogEntry> =
                serde_json::from_value(value).map_err(|e| GeneratorError::CatalogParse {
                    message: format!("category '{}': {}", name, e),
                })?;
            categories.push(Category { name, entries });
        }

        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All entries, category by category, in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Method names that appear more than once, in first-seen order.
    ///
    /// The emitter resolves these as last writer wins.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for entry in self.entries() {
            let count = counts.entry(entry.name.as_str()).or_insert(0);
            if *count == 0 {
                order.push(entry.name.as_str());
            }
            *count += 1;
        }

        order
            .into_iter()
            .filter(|name| counts[name] > 1)
            .map(str::to_string)
            .collect()
    }
}
