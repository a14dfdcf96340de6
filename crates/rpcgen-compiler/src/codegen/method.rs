//! Method stub generation.
//!
//! Every stub has the same body: forward the method name and the positional
//! arguments, in catalog order, to the skeleton's `request` transport.

use crate::catalog::CatalogEntry;
use crate::diagnostic::EntryError;
use crate::syntax::{is_identifier_name, is_valid_param_name, TypeSyntax};
use super::ts_types::render_jsdoc;

/// A generated client method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Method name, identical to the RPC name.
    pub name: String,
    /// JSDoc lines (empty = no doc block).
    pub doc: Vec<String>,
    pub params: Vec<ParamDecl>,
    /// Type wrapped in `Promise<...>` for the signature.
    pub return_type: String,
}

/// A parameter in a generated signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Identifier with the optional marker stripped.
    pub name: String,
    pub typ: String,
    pub optional: bool,
}

/// Builds the method stub for a catalog entry.
///
/// `description` may be empty. When `doc_base` is set a reference link
/// `<doc_base><name>.html` is appended to the doc block.
pub fn build_method(
    entry: &CatalogEntry,
    description: &str,
    doc_base: Option<&str>,
    syntax: &mut TypeSyntax,
) -> Result<MethodDecl, EntryError> {
    if !is_identifier_name(&entry.name) {
        return Err(EntryError::InvalidIdentifier {
            name: entry.name.clone(),
        });
    }

    let mut params: Vec<ParamDecl> = Vec::with_capacity(entry.params.len());
    for param in &entry.params {
        let ident = param.ident();
        if !is_valid_param_name(ident) {
            return Err(EntryError::InvalidIdentifier {
                name: param.name.clone(),
            });
        }
        if params.iter().any(|p| p.name == ident) {
            return Err(EntryError::DuplicateParam {
                name: ident.to_string(),
            });
        }
        if !syntax.is_valid_type(&param.typ) {
            return Err(EntryError::InvalidParamType {
                param: param.name.clone(),
                typ: param.typ.clone(),
            });
        }
        params.push(ParamDecl {
            name: ident.to_string(),
            typ: param.typ.clone(),
            optional: param.is_optional(),
        });
    }

    let mut doc: Vec<String> = description
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();
    while doc.last().is_some_and(|line| line.is_empty()) {
        doc.pop();
    }
    if let Some(base) = doc_base {
        doc.push(format!("{}{}.html", base, entry.name));
    }

    Ok(MethodDecl {
        name: entry.name.clone(),
        doc,
        params,
        return_type: entry.result_type_name(),
    })
}

impl MethodDecl {
    /// Positional argument list passed to `request`.
    pub fn call_args(&self) -> String {
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Renders the method at class-member indentation.
    pub fn render(&self) -> String {
        let mut code = String::new();
        code.push_str(&render_jsdoc(&self.doc, "  "));

        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                let opt = if p.optional { "?" } else { "" };
                format!("{}{}: {}", p.name, opt, p.typ)
            })
            .collect();

        code.push_str(&format!(
            "  async {}({}): Promise<{}> {{\n",
            self.name,
            params.join(", "),
            self.return_type
        ));
        code.push_str(&format!(
            "    return await this.request(\"{}\", [{}]);\n",
            self.name,
            self.call_args()
        ));
        code.push_str("  }\n");
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Param;

    fn getblock() -> CatalogEntry {
        CatalogEntry {
            name: "getblock".to_string(),
            params: vec![Param::new("blockhash", "string"), Param::new("verbosity?", "number")],
            result: serde_json::json!({ "hash": "string", "height": "number" }),
        }
    }

    #[test]
    fn test_params_keep_order_and_strip_marker() {
        let mut syntax = TypeSyntax::new().unwrap();
        let method = build_method(&getblock(), "", None, &mut syntax).unwrap();

        assert_eq!(
            method.params,
            vec![
                ParamDecl { name: "blockhash".to_string(), typ: "string".to_string(), optional: false },
                ParamDecl { name: "verbosity".to_string(), typ: "number".to_string(), optional: true },
            ]
        );
        assert_eq!(method.call_args(), "blockhash, verbosity");
    }

    #[test]
    fn test_render_getblock() {
        let mut syntax = TypeSyntax::new().unwrap();
        let method = build_method(&getblock(), "", None, &mut syntax).unwrap();
        assert_eq!(
            method.render(),
            "  async getblock(blockhash: string, verbosity?: number): Promise<getblockResult> {\n    return await this.request(\"getblock\", [blockhash, verbosity]);\n  }\n"
        );
    }

    #[test]
    fn test_doc_block_with_reference_link() {
        let mut syntax = TypeSyntax::new().unwrap();
        let method = build_method(
            &getblock(),
            "Returns a block.\n",
            Some("https://developer.bitcoin.org/reference/rpc/"),
            &mut syntax,
        )
        .unwrap();

        assert_eq!(
            method.doc,
            vec![
                "Returns a block.".to_string(),
                "https://developer.bitcoin.org/reference/rpc/getblock.html".to_string(),
            ]
        );
        assert!(method.render().starts_with(
            "  /**\n   * Returns a block.\n   * https://developer.bitcoin.org/reference/rpc/getblock.html\n   */\n  async getblock("
        ));
    }

    #[test]
    fn test_invalid_method_name() {
        let mut syntax = TypeSyntax::new().unwrap();
        let mut entry = getblock();
        entry.name = "get-block".to_string();
        assert_eq!(
            build_method(&entry, "", None, &mut syntax).unwrap_err(),
            EntryError::InvalidIdentifier { name: "get-block".to_string() }
        );
    }

    #[test]
    fn test_keyword_method_name_is_allowed() {
        let mut syntax = TypeSyntax::new().unwrap();
        let mut entry = getblock();
        entry.name = "delete".to_string();
        let method = build_method(&entry, "", None, &mut syntax).unwrap();
        assert!(method.render().starts_with("  async delete(blockhash: string"));
    }

    #[test]
    fn test_repeated_param_name() {
        let mut syntax = TypeSyntax::new().unwrap();
        let mut entry = getblock();
        entry.params = vec![Param::new("a", "string"), Param::new("a?", "number")];
        assert_eq!(
            build_method(&entry, "", None, &mut syntax).unwrap_err(),
            EntryError::DuplicateParam { name: "a".to_string() }
        );
    }

    #[test]
    fn test_strict_mode_param_names() {
        let mut syntax = TypeSyntax::new().unwrap();
        for name in [
            "await", "yield", "let", "static", "implements", "interface", "package", "private",
            "protected", "public", "arguments", "eval", "delete", "eval?",
        ] {
            let mut entry = getblock();
            entry.params = vec![Param::new("blockhash", "string"), Param::new(name, "string")];
            assert_eq!(
                build_method(&entry, "", None, &mut syntax).unwrap_err(),
                EntryError::InvalidIdentifier { name: name.to_string() },
                "expected '{}' to be rejected",
                name
            );
        }
    }

    #[test]
    fn test_invalid_param_type() {
        let mut syntax = TypeSyntax::new().unwrap();
        let mut entry = getblock();
        entry.params[1] = Param::new("verbosity?", "Array<number");
        assert!(matches!(
            build_method(&entry, "", None, &mut syntax),
            Err(EntryError::InvalidParamType { param, .. }) if param == "verbosity?"
        ));
    }
}
