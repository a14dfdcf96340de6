//! # rpcgen Compiler
//!
//! This crate turns a declarative JSON-RPC method catalog into a typed
//! TypeScript client: one `async` method per RPC call plus one
//! `<name>Result` type per call, merged into a copy of a hand-written client
//! skeleton that owns the HTTP transport.
//!
//! ## Architecture
//!
//! ```text
//! methods.json        descriptions.json       runtime/client.ts
//!      │                     │                       │
//!      ▼                     ▼                       ▼
//! ┌──────────┐        ┌──────────────┐        ┌────────────┐
//! │ Catalog  │        │ Descriptions │        │  Skeleton  │  tree-sitter outline
//! └────┬─────┘        └──────┬───────┘        └─────┬──────┘
//!      │                     │                      │ duplicate()
//!      ▼                     ▼                      ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Emitter: synthesize <name>Result + async method stub    │
//! │  (bad entries are logged and skipped)                    │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ after each category
//!                              ▼
//!                           mod.ts
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rpcgen_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     catalog_path: "methods.json".into(),
//!     out_path: "mod.ts".into(),
//!     ..Default::default()
//! };
//!
//! let result = Generator::new(config).generate()?;
//! println!("{} methods, {} skipped", result.methods, result.skipped.len());
//! ```

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod descriptions;
pub mod diagnostic;
pub mod synth;
pub mod syntax;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use catalog::{Catalog, CatalogEntry, Param};
pub use codegen::{ClientSkeleton, GeneratedCode, SkippedEntry};
pub use config::GeneratorConfig;
pub use descriptions::DescriptionStore;
pub use diagnostic::{EntryError, GeneratorError};
pub use syntax::TypeSyntax;

/// The main generator struct that orchestrates the pipeline.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the client and writes it to `out_path`.
    ///
    /// This runs the full pipeline:
    /// 1. Load the catalog (fatal on failure)
    /// 2. Load the description store once
    /// 3. Parse the skeleton
    /// 4. Emit every entry, category by category
    /// 5. Rewrite the whole output file after each category
    pub fn generate(&self) -> Result<GenerateResult, GeneratorError> {
        self.run(true)
    }

    /// Runs the pipeline in memory without writing anything.
    pub fn check(&self) -> Result<GenerateResult, GeneratorError> {
        self.run(false)
    }

    fn run(&self, write: bool) -> Result<GenerateResult, GeneratorError> {
        // Phase 1: Catalog
        let catalog = Catalog::load(&self.config.catalog_path)?;
        debug!(
            catalog = %self.config.catalog_path.display(),
            categories = catalog.categories().len(),
            entries = catalog.len(),
            "Loaded method catalog."
        );

        // Phase 2: Descriptions
        let descriptions = match &self.config.descriptions_path {
            Some(path) => DescriptionStore::load(path)?,
            None => DescriptionStore::default(),
        };

        // Phase 3: Skeleton
        let mut syntax = TypeSyntax::new()?;
        let skeleton = match &self.config.skeleton_path {
            Some(path) => ClientSkeleton::load(path, &self.config.class_name, &mut syntax)?,
            None => ClientSkeleton::embedded(&self.config.class_name, &mut syntax)?,
        };

        // Phase 4 + 5: Emit, persisting after every category
        let out_path = &self.config.out_path;
        let generated = codegen::generate(
            &catalog,
            &skeleton,
            &descriptions,
            self.config.doc_base.as_deref(),
            &mut syntax,
            |category, client| {
                if write {
                    write_output(out_path, &client.render())?;
                    info!(
                        category = %category.name,
                        methods = client.bindings().len(),
                        out = %out_path.display(),
                        "Saved generated client."
                    );
                }
                Ok(())
            },
        )?;

        // An empty catalog never reaches the per-category save.
        if write && catalog.categories().is_empty() {
            write_output(out_path, &generated.source)?;
        }

        Ok(GenerateResult {
            categories: catalog.categories().len(),
            entries: catalog.len(),
            methods: generated.methods,
            skipped: generated.skipped,
            duplicates: catalog.duplicate_names(),
            out_path: write.then(|| out_path.clone()),
        })
    }
}

/// Writes the full generated document.
fn write_output(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteFailed {
            path: parent.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    std::fs::write(path, content).map_err(|e| GeneratorError::WriteFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Result of a generation run.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of catalog categories.
    pub categories: usize,
    /// Number of catalog entries.
    pub entries: usize,
    /// Number of methods on the generated class.
    pub methods: usize,
    /// Entries left out because they failed synthesis or emission.
    pub skipped: Vec<SkippedEntry>,
    /// Method names defined more than once (last definition wins).
    pub duplicates: Vec<String>,
    /// Where the client was written, if it was.
    pub out_path: Option<PathBuf>,
}
