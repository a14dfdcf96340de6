//! Client skeleton handling.
//!
//! The skeleton is the hand-written base client. The emitter never edits it:
//! `ClientSkeleton::duplicate` hands out a `GeneratedClient` that owns its own
//! copy of the source and accumulates methods on top of it.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use crate::diagnostic::GeneratorError;
use crate::synth::ResultTypeDecl;
use crate::syntax::{SkeletonOutline, TypeSyntax};
use super::method::MethodDecl;
use super::runtime;
use super::ts_types::render_result_type;

/// Banner written at the top of every generated client.
pub const GENERATED_BANNER: &str = "// Code generated by rpcgen. DO NOT EDIT.\n\n";

/// A parsed, immutable client skeleton.
#[derive(Debug, Clone)]
pub struct ClientSkeleton {
    source: String,
    class_name: String,
    outline: SkeletonOutline,
}

impl ClientSkeleton {
    /// Parses `source` and locates `class_name` in it.
    pub fn parse(
        source: impl Into<String>,
        class_name: &str,
        syntax: &mut TypeSyntax,
    ) -> Result<Self, GeneratorError> {
        let source = source.into();
        let outline = syntax.outline_skeleton(&source, class_name)?;
        Ok(Self {
            source,
            class_name: class_name.to_string(),
            outline,
        })
    }

    /// The skeleton shipped with the generator.
    pub fn embedded(class_name: &str, syntax: &mut TypeSyntax) -> Result<Self, GeneratorError> {
        Self::parse(runtime::CLIENT, class_name, syntax)
    }

    /// Loads a skeleton from disk.
    pub fn load(path: &Path, class_name: &str, syntax: &mut TypeSyntax) -> Result<Self, GeneratorError> {
        let source = std::fs::read_to_string(path).map_err(|e| GeneratorError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(source, class_name, syntax)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// True if the class already declares a member called `name`.
    pub fn has_member(&self, name: &str) -> bool {
        self.outline.members.iter().any(|m| m == name)
    }

    /// True if the skeleton binds `name` at module level.
    pub fn declares(&self, name: &str) -> bool {
        self.outline.declarations.iter().any(|d| d == name)
    }

    /// Starts a new generated client from a copy of this skeleton.
    pub fn duplicate(&self) -> GeneratedClient {
        GeneratedClient {
            skeleton: self.clone(),
            bindings: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// One generated method together with its result type.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub method: MethodDecl,
    pub result: ResultTypeDecl,
}

/// A skeleton copy augmented with generated bindings.
#[derive(Debug, Clone)]
pub struct GeneratedClient {
    skeleton: ClientSkeleton,
    bindings: Vec<Binding>,
    /// Method name -> position in `bindings`.
    index: HashMap<String, usize>,
}

impl GeneratedClient {
    /// Adds a binding. A method name seen before is overwritten in place
    /// (last writer wins); returns true in that case.
    pub fn add(&mut self, binding: Binding) -> bool {
        match self.index.get(&binding.method.name) {
            Some(&position) => {
                warn!(
                    method = %binding.method.name,
                    "Duplicate method in catalog, replacing the earlier definition."
                );
                self.bindings[position] = binding;
                true
            }
            None => {
                self.index.insert(binding.method.name.clone(), self.bindings.len());
                self.bindings.push(binding);
                false
            }
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.index.get(name).map(|&position| &self.bindings[position])
    }

    pub fn skeleton(&self) -> &ClientSkeleton {
        &self.skeleton
    }

    /// Renders the full client source.
    pub fn render(&self) -> String {
        let source = self.skeleton.source();
        let close = self.skeleton.outline.body_close;
        let (head, tail) = source.split_at(close);

        let mut code = String::with_capacity(source.len() + self.bindings.len() * 256);
        code.push_str(GENERATED_BANNER);
        code.push_str(head);

        for binding in &self.bindings {
            if !code.ends_with('\n') {
                code.push('\n');
            }
            code.push('\n');
            code.push_str(&binding.method.render());
        }

        code.push_str(tail);

        for binding in &self.bindings {
            if !code.ends_with('\n') {
                code.push('\n');
            }
            code.push('\n');
            code.push_str(&render_result_type(&binding.result));
        }

        code
    }
}
