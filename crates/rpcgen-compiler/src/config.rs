//! Generator configuration.

use std::path::PathBuf;

/// Class name used by the embedded skeleton.
pub const DEFAULT_CLASS_NAME: &str = "BitcoinRPC";

/// Configuration for the rpcgen generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Method catalog (JSON, category -> entries).
    pub catalog_path: PathBuf,

    /// Cached description store. `None` disables JSDoc descriptions.
    pub descriptions_path: Option<PathBuf>,

    /// Generated client file.
    pub out_path: PathBuf,

    /// Hand-written skeleton to augment. `None` uses the embedded one.
    pub skeleton_path: Option<PathBuf>,

    /// Name of the class in the skeleton that receives the methods.
    pub class_name: String,

    /// Base URL for per-method reference links, e.g.
    /// `https://developer.bitcoin.org/reference/rpc/`.
    pub doc_base: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("methods.json"),
            descriptions_path: Some(PathBuf::from("descriptions.json")),
            out_path: PathBuf::from("mod.ts"),
            skeleton_path: None,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            doc_base: None,
        }
    }
}
