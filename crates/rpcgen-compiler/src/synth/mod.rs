//! Result-type synthesis.
//!
//! Every catalog entry gets a `<name>Result` type derived from its result
//! shape, classified by field count:
//!
//! | fields | declaration                                  |
//! |--------|----------------------------------------------|
//! | 0      | `type XResult = void;`                       |
//! | 1      | `type XResult = T;` (the key is discarded)   |
//! | 2+     | `interface XResult { a: A; b: B; }`          |
//!
//! Many write/action RPCs return nothing meaningful, so an empty or absent
//! shape becomes `void`.

mod shape;

pub use shape::{property_key, type_expr};

use serde_json::Value;

use crate::catalog::CatalogEntry;
use crate::diagnostic::EntryError;
use crate::syntax::TypeSyntax;

/// A synthesized result type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTypeDecl {
    /// `<methodName>Result`.
    pub name: String,
    pub kind: ResultKind,
}

/// Representation chosen for a result type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultKind {
    /// The call returns nothing meaningful.
    Void,
    /// Alias to a single type expression.
    Alias(String),
    /// Structured record, one property per shape field.
    Record(Vec<ResultField>),
}

/// One property of a structured result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultField {
    pub name: String,
    pub typ: String,
}

/// Synthesizes the result type for a catalog entry.
pub fn synthesize(entry: &CatalogEntry, syntax: &mut TypeSyntax) -> Result<ResultTypeDecl, EntryError> {
    let kind = match &entry.result {
        Value::Null => ResultKind::Void,
        Value::Object(fields) => match fields.len() {
            0 => ResultKind::Void,
            1 => {
                let (key, value) = fields.iter().next().ok_or_else(|| EntryError::MalformedShape {
                    path: "result".to_string(),
                    message: "single-field shape has no field".to_string(),
                })?;
                ResultKind::Alias(type_expr(value, &format!("result.{}", key), syntax)?)
            }
            _ => {
                let mut record = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    record.push(ResultField {
                        name: key.clone(),
                        typ: type_expr(value, &format!("result.{}", key), syntax)?,
                    });
                }
                ResultKind::Record(record)
            }
        },
        other => {
            return Err(EntryError::MalformedShape {
                path: "result".to_string(),
                message: format!("expected an object shape, found {}", other),
            })
        }
    };

    Ok(ResultTypeDecl {
        name: entry.result_type_name(),
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(name: &str, result: Value) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            params: vec![],
            result,
        }
    }

    #[test]
    fn test_empty_shape_is_void() {
        let mut syntax = TypeSyntax::new().unwrap();
        let decl = synthesize(&entry("stop", json!({})), &mut syntax).unwrap();
        assert_eq!(decl.name, "stopResult");
        assert_eq!(decl.kind, ResultKind::Void);

        let decl = synthesize(&entry("ping", Value::Null), &mut syntax).unwrap();
        assert_eq!(decl.kind, ResultKind::Void);
    }

    #[test]
    fn test_single_field_hoists_value_type() {
        let mut syntax = TypeSyntax::new().unwrap();
        let decl = synthesize(&entry("getblockcount", json!({ "": "number" })), &mut syntax).unwrap();
        assert_eq!(decl.kind, ResultKind::Alias("number".to_string()));

        let decl = synthesize(&entry("getbestblockhash", json!({ "hex": "string" })), &mut syntax).unwrap();
        assert_eq!(decl.kind, ResultKind::Alias("string".to_string()));
    }

    #[test]
    fn test_multi_field_keeps_names_types_and_order() {
        let mut syntax = TypeSyntax::new().unwrap();
        let shape = json!({ "hash": "string", "height": "number", "tx": "Array<string>", "bits": "string" });
        let decl = synthesize(&entry("getblock", shape), &mut syntax).unwrap();

        let ResultKind::Record(fields) = decl.kind else {
            panic!("expected a record");
        };
        let pairs: Vec<(&str, &str)> = fields.iter().map(|f| (f.name.as_str(), f.typ.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("hash", "string"), ("height", "number"), ("tx", "Array<string>"), ("bits", "string")]
        );
    }

    #[test]
    fn test_non_object_shape_is_malformed() {
        let mut syntax = TypeSyntax::new().unwrap();
        let err = synthesize(&entry("uptime", json!("number")), &mut syntax).unwrap_err();
        assert!(matches!(err, EntryError::MalformedShape { path, .. } if path == "result"));
    }

    #[test]
    fn test_bad_field_type_fails_the_entry() {
        let mut syntax = TypeSyntax::new().unwrap();
        let err = synthesize(&entry("getblock", json!({ "hash": "string", "height": 5 })), &mut syntax)
            .unwrap_err();
        assert!(matches!(err, EntryError::MalformedShape { path, .. } if path == "result.height"));
    }
}
