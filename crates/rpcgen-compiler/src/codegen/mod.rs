//! TypeScript client generation from the method catalog.
//!
//! For every catalog entry, in category/list order, the emitter:
//! - synthesizes `<name>Result` from the entry's result shape
//! - builds an `async` method that forwards to `this.request`
//! - adds both to a copy of the client skeleton
//!
//! A failing entry is logged and skipped. It never stops the loop.

mod method;
mod skeleton;
mod ts_types;
pub mod runtime;

pub use method::{build_method, MethodDecl, ParamDecl};
pub use skeleton::{Binding, ClientSkeleton, GeneratedClient, GENERATED_BANNER};
pub use ts_types::{render_jsdoc, render_result_type};

use tracing::{debug, warn};

use crate::catalog::{Catalog, CatalogEntry, Category};
use crate::descriptions::DescriptionStore;
use crate::diagnostic::{EntryError, GeneratorError};
use crate::synth::synthesize;
use crate::syntax::TypeSyntax;

/// A catalog entry that was left out of the generated client.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub category: String,
    pub name: String,
    pub error: EntryError,
}

/// Accumulates bindings on a duplicated skeleton.
pub struct Emitter<'a> {
    syntax: &'a mut TypeSyntax,
    descriptions: &'a DescriptionStore,
    doc_base: Option<&'a str>,
    client: GeneratedClient,
    skipped: Vec<SkippedEntry>,
}

impl<'a> Emitter<'a> {
    pub fn new(
        skeleton: &ClientSkeleton,
        descriptions: &'a DescriptionStore,
        doc_base: Option<&'a str>,
        syntax: &'a mut TypeSyntax,
    ) -> Self {
        Self {
            syntax,
            descriptions,
            doc_base,
            client: skeleton.duplicate(),
            skipped: Vec::new(),
        }
    }

    /// Emits every entry of a category, skipping the ones that fail.
    pub fn emit_category(&mut self, category: &Category) {
        for entry in &category.entries {
            if let Err(error) = self.emit_entry(entry) {
                warn!(
                    category = %category.name,
                    method = %entry.name,
                    %error,
                    "Skipping catalog entry."
                );
                self.skipped.push(SkippedEntry {
                    category: category.name.clone(),
                    name: entry.name.clone(),
                    error,
                });
            }
        }
    }

    /// Emits one entry onto the running client.
    pub fn emit_entry(&mut self, entry: &CatalogEntry) -> Result<(), EntryError> {
        if self.client.skeleton().has_member(&entry.name) {
            return Err(EntryError::ReservedMember {
                name: entry.name.clone(),
            });
        }

        let result_name = entry.result_type_name();
        if self.client.skeleton().declares(&result_name) {
            return Err(EntryError::DuplicateTypeName { name: result_name });
        }

        let description = self.descriptions.get(&entry.name);
        let method = build_method(entry, description, self.doc_base, self.syntax)?;
        let result = synthesize(entry, self.syntax)?;

        debug!(method = %entry.name, params = method.params.len(), "Emitted binding.");
        self.client.add(Binding { method, result });
        Ok(())
    }

    pub fn client(&self) -> &GeneratedClient {
        &self.client
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn finish(self) -> GeneratedCode {
        GeneratedCode {
            source: self.client.render(),
            methods: self.client.bindings().len(),
            skipped: self.skipped,
        }
    }
}

/// Generated TypeScript client.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    /// Full client source.
    pub source: String,
    /// Number of methods on the generated class.
    pub methods: usize,
    /// Entries that were left out, in catalog order.
    pub skipped: Vec<SkippedEntry>,
}

/// Generates the client for a whole catalog.
///
/// `on_category` runs after each category with the client accumulated so
/// far; the generator uses it to persist partial output.
pub fn generate<F>(
    catalog: &Catalog,
    skeleton: &ClientSkeleton,
    descriptions: &DescriptionStore,
    doc_base: Option<&str>,
    syntax: &mut TypeSyntax,
    mut on_category: F,
) -> Result<GeneratedCode, GeneratorError>
where
    F: FnMut(&Category, &GeneratedClient) -> Result<(), GeneratorError>,
{
    let mut emitter = Emitter::new(skeleton, descriptions, doc_base, syntax);

    for category in catalog.categories() {
        emitter.emit_category(category);
        on_category(category, emitter.client())?;
    }

    Ok(emitter.finish())
}
