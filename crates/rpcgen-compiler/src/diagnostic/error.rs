//! Generator error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a whole generation run.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read file '{path}': {message}")]
    #[diagnostic(code(rpcgen::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to write generated client '{path}': {message}")]
    #[diagnostic(code(rpcgen::io::write_error))]
    WriteFailed {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Catalog Errors
    // =========================================================================
    #[error("Failed to parse method catalog: {message}")]
    #[diagnostic(
        code(rpcgen::catalog::parse_failed),
        help("The catalog must be a JSON object of category -> [{{ name, params: [{{ name, type }}], result }}]")
    )]
    CatalogParse {
        message: String,
    },

    #[error("Failed to parse description store: {message}")]
    #[diagnostic(
        code(rpcgen::descriptions::parse_failed),
        help("The description store must be a flat JSON object of method name -> description")
    )]
    DescriptionsParse {
        message: String,
    },

    // =========================================================================
    // Skeleton Errors
    // =========================================================================
    #[error("Failed to initialize TypeScript parser")]
    #[diagnostic(code(rpcgen::parse::init_failed))]
    ParserInitFailed,

    #[error("Client skeleton has syntax errors near line {line}")]
    #[diagnostic(
        code(rpcgen::skeleton::syntax_error),
        help("The skeleton is copied verbatim into the output, so it must parse as TypeScript")
    )]
    SkeletonSyntax {
        line: usize,
    },

    #[error("Class '{class_name}' not found in client skeleton")]
    #[diagnostic(
        code(rpcgen::skeleton::class_not_found),
        help("Pass --class with the name of the class declared in the skeleton")
    )]
    ClassNotFound {
        class_name: String,
    },
}

impl GeneratorError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors isolated to a single catalog entry.
///
/// The generator logs these and moves on to the next entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier {
        name: String,
    },

    #[error("'{name}' collides with the skeleton member of the same name")]
    ReservedMember {
        name: String,
    },

    #[error("parameter '{name}' is declared more than once")]
    DuplicateParam {
        name: String,
    },

    #[error("result type '{name}' is already declared by the skeleton")]
    DuplicateTypeName {
        name: String,
    },

    #[error("parameter '{param}' has invalid type '{typ}'")]
    InvalidParamType {
        param: String,
        typ: String,
    },

    #[error("malformed result shape at '{path}': {message}")]
    MalformedShape {
        path: String,
        message: String,
    },
}
