//! TypeScript syntax checks using tree-sitter.

use tree_sitter::{Node, Parser};

use crate::diagnostic::GeneratorError;

/// Name bound by the probe declaration used to check type expressions.
const PROBE_ALIAS: &str = "__RpcgenProbe";

/// Words that cannot name a binding anywhere.
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with",
];

/// Words that cannot name a parameter of an async class method. Class
/// bodies are strict mode code.
const STRICT_RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "eval", "implements", "interface", "let", "package", "private",
    "protected", "public", "static", "yield",
];

/// Top-level declarations whose name is recorded in the outline.
const DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "class",
    "interface_declaration",
    "type_alias_declaration",
    "enum_declaration",
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
];

/// Location of the augmented class inside a skeleton source.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonOutline {
    /// Byte offset of the class body's closing `}`.
    pub body_close: usize,
    /// Names of members already declared on the class.
    pub members: Vec<String>,
    /// Names bound at module level (types, classes, functions, variables).
    pub declarations: Vec<String>,
}

/// TypeScript syntax checker.
pub struct TypeSyntax {
    parser: Parser,
}

impl TypeSyntax {
    /// Creates a new checker.
    pub fn new() -> Result<Self, GeneratorError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| GeneratorError::ParserInitFailed)?;
        Ok(Self { parser })
    }

    /// Returns true if `expr` parses as a single TypeScript type expression.
    pub fn is_valid_type(&mut self, expr: &str) -> bool {
        if expr.trim().is_empty() {
            return false;
        }

        let probe = format!("type {} = {};", PROBE_ALIAS, expr);
        let Some(tree) = self.parser.parse(&probe, None) else {
            return false;
        };

        let root = tree.root_node();
        if root.has_error() || root.named_child_count() != 1 {
            return false;
        }

        root.named_child(0)
            .is_some_and(|decl| decl.kind() == "type_alias_declaration")
    }

    /// Parses a skeleton and locates the class named `class_name`.
    pub fn outline_skeleton(
        &mut self,
        source: &str,
        class_name: &str,
    ) -> Result<SkeletonOutline, GeneratorError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(GeneratorError::ParserInitFailed)?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(0) + 1;
            return Err(GeneratorError::SkeletonSyntax { line });
        }

        let class = find_class(root, source, class_name).ok_or_else(|| {
            GeneratorError::ClassNotFound {
                class_name: class_name.to_string(),
            }
        })?;

        let body = class
            .child_by_field_name("body")
            .ok_or_else(|| GeneratorError::ClassNotFound {
                class_name: class_name.to_string(),
            })?;

        let mut members = Vec::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            let name = member
                .child_by_field_name("name")
                .or_else(|| member.child_by_field_name("property"));
            if let Some(name) = name {
                members.push(node_text(name, source).to_string());
            }
        }

        Ok(SkeletonOutline {
            body_close: body.end_byte() - 1,
            members,
            declarations: top_level_names(root, source),
        })
    }
}

/// Returns true if `name` is an ASCII identifier name.
///
/// Keywords are identifier names too: they are legal as method names and
/// property keys.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Returns true if `name` can be a parameter of a generated method.
pub fn is_valid_param_name(name: &str) -> bool {
    is_identifier_name(name)
        && !RESERVED_WORDS.contains(&name)
        && !STRICT_RESERVED_WORDS.contains(&name)
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn find_class<'t>(node: Node<'t>, source: &str, class_name: &str) -> Option<Node<'t>> {
    if matches!(node.kind(), "class_declaration" | "abstract_class_declaration" | "class") {
        if let Some(name) = node.child_by_field_name("name") {
            if node_text(name, source) == class_name {
                return Some(node);
            }
        }
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| find_class(child, source, class_name))
}

fn top_level_names(root: Node, source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        if statement.kind() == "export_statement" {
            let mut inner = statement.walk();
            for child in statement.named_children(&mut inner) {
                declared_names(child, source, &mut names);
            }
        } else {
            declared_names(statement, source, &mut names);
        }
    }
    names
}

fn declared_names(node: Node, source: &str, names: &mut Vec<String>) {
    if DECLARATION_KINDS.contains(&node.kind()) {
        if let Some(name) = node.child_by_field_name("name") {
            names.push(node_text(name, source).to_string());
        }
        return;
    }

    if matches!(node.kind(), "lexical_declaration" | "variable_declaration") {
        let mut cursor = node.walk();
        for declarator in node.named_children(&mut cursor) {
            let name = declarator
                .child_by_field_name("name")
                .filter(|name| name.kind() == "identifier");
            if let Some(name) = name {
                names.push(node_text(name, source).to_string());
            }
        }
    }
}

fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_type_expressions() {
        let mut syntax = TypeSyntax::new().unwrap();
        for expr in [
            "string",
            "number",
            "Array<string>",
            "string[]",
            "{ hex: string; height?: number }",
            "\"unset\" | \"economical\" | \"conservative\"",
            "Record<string, unknown>",
        ] {
            assert!(syntax.is_valid_type(expr), "expected '{}' to be valid", expr);
        }
    }

    #[test]
    fn test_invalid_type_expressions() {
        let mut syntax = TypeSyntax::new().unwrap();
        for expr in ["", "   ", "Array<string", "string; const x = 1", "{ a: }"] {
            assert!(!syntax.is_valid_type(expr), "expected '{}' to be invalid", expr);
        }
    }

    #[test]
    fn test_identifier_names() {
        assert!(is_identifier_name("getblock"));
        assert!(is_identifier_name("_private"));
        assert!(is_identifier_name("$x1"));
        assert!(is_identifier_name("delete"));
        assert!(!is_identifier_name(""));
        assert!(!is_identifier_name("1abc"));
        assert!(!is_identifier_name("get-block"));
    }

    #[test]
    fn test_param_names_exclude_strict_mode_words() {
        assert!(is_valid_param_name("blockhash"));
        assert!(is_valid_param_name("async"));
        for word in ["delete", "await", "yield", "let", "static", "public", "arguments", "eval"] {
            assert!(!is_valid_param_name(word), "expected '{}' to be rejected", word);
        }
    }

    #[test]
    fn test_outline_collects_top_level_declarations() {
        let source = "interface A {}\nexport type B = string;\nconst c = 1, { d } = {};\nfunction e() {}\nexport class F {}\nexport enum G { X }\n";
        let mut syntax = TypeSyntax::new().unwrap();
        let outline = syntax.outline_skeleton(source, "F").unwrap();
        assert_eq!(outline.declarations, vec!["A", "B", "c", "e", "F", "G"]);
    }

    #[test]
    fn test_outline_finds_class_body_and_members() {
        let source = "export default class Client {\n  url: string;\n  constructor() { this.url = \"}\"; }\n  request() {}\n}\n";
        let mut syntax = TypeSyntax::new().unwrap();
        let outline = syntax.outline_skeleton(source, "Client").unwrap();

        assert_eq!(&source[outline.body_close..outline.body_close + 1], "}");
        assert_eq!(outline.body_close, source.trim_end().len() - 1);
        assert_eq!(outline.members, vec!["url", "constructor", "request"]);
    }

    #[test]
    fn test_outline_missing_class() {
        let mut syntax = TypeSyntax::new().unwrap();
        let err = syntax.outline_skeleton("class Other {}\n", "Client").unwrap_err();
        assert!(matches!(err, GeneratorError::ClassNotFound { .. }));
    }

    #[test]
    fn test_outline_rejects_broken_skeleton() {
        let mut syntax = TypeSyntax::new().unwrap();
        let err = syntax.outline_skeleton("class Client {\n  foo( {\n", "Client").unwrap_err();
        assert!(matches!(err, GeneratorError::SkeletonSyntax { .. }));
    }
}
