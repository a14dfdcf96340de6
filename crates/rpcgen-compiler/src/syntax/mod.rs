//! TypeScript syntax support.
//!
//! The generator never builds a full TypeScript AST. It only needs to:
//! 1. Check that catalog type expressions are well-formed
//! 2. Locate the class body in the client skeleton
//!
//! Both are done with the tree-sitter TypeScript grammar.

mod parser;

pub use parser::{is_identifier_name, is_valid_param_name, SkeletonOutline, TypeSyntax};
