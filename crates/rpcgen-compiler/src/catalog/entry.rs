//! Catalog entry types.

use serde::{Deserialize, Serialize};

/// Marker suffix on a parameter name that makes it optional.
pub const OPTIONAL_MARKER: char = '?';

/// One RPC call in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// RPC method name, used verbatim as the generated method name.
    pub name: String,

    /// Positional parameters in call order.
    #[serde(default)]
    pub params: Vec<Param>,

    /// Result shape descriptor. Kept raw; the synthesizer classifies it.
    #[serde(default)]
    pub result: serde_json::Value,
}

/// A positional parameter of an RPC call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name as written in the catalog, possibly with a trailing `?`.
    pub name: String,

    /// TypeScript type expression.
    #[serde(rename = "type")]
    pub typ: String,
}

impl Param {
    pub fn new(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
        }
    }

    /// The parameter name with the optional marker stripped.
    pub fn ident(&self) -> &str {
        self.name
            .strip_suffix(OPTIONAL_MARKER)
            .unwrap_or(&self.name)
    }

    pub fn is_optional(&self) -> bool {
        self.name.ends_with(OPTIONAL_MARKER)
    }
}

impl CatalogEntry {
    /// Name of the synthesized result type.
    pub fn result_type_name(&self) -> String {
        format!("{}Result", self.name)
    }
}
