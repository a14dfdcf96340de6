//! Result-shape descriptor to TypeScript type expression.

use serde_json::Value;

use crate::diagnostic::EntryError;
use crate::syntax::{is_identifier_name, TypeSyntax};

/// Converts one shape value into a type expression.
///
/// - string: a type expression, used verbatim once it parses
/// - object: an inline object type, fields in insertion order
/// - one-element array: `Array<T>` of the element's type
///
/// `path` names the value for diagnostics (e.g. `result.tx`).
pub fn type_expr(value: &Value, path: &str, syntax: &mut TypeSyntax) -> Result<String, EntryError> {
    match value {
        Value::String(expr) => {
            if syntax.is_valid_type(expr) {
                Ok(expr.clone())
            } else {
                Err(malformed(path, format!("'{}' is not a valid type expression", expr)))
            }
        }
        Value::Object(fields) => {
            if fields.is_empty() {
                return Ok("Record<string, never>".to_string());
            }

            let mut parts = Vec::with_capacity(fields.len());
            for (key, inner) in fields {
                let inner_path = format!("{}.{}", path, key);
                let typ = type_expr(inner, &inner_path, syntax)?;
                parts.push(format!("{}: {}", property_key(key), typ));
            }
            Ok(format!("{{ {} }}", parts.join("; ")))
        }
        Value::Array(items) => match items.as_slice() {
            [item] => {
                let inner = type_expr(item, &format!("{}[]", path), syntax)?;
                Ok(format!("Array<{}>", inner))
            }
            _ => Err(malformed(
                path,
                format!("array descriptors need exactly one element, found {}", items.len()),
            )),
        },
        Value::Null => Err(malformed(path, "null is not a type descriptor")),
        Value::Bool(_) | Value::Number(_) => {
            Err(malformed(path, format!("{} is not a type descriptor", value)))
        }
    }
}

/// Quotes a property key when it is not a plain identifier.
pub fn property_key(key: &str) -> String {
    if is_identifier_name(key) {
        key.to_string()
    } else {
        let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\"", escaped)
    }
}

fn malformed(path: &str, message: impl Into<String>) -> EntryError {
    EntryError::MalformedShape {
        path: path.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_descriptor_is_verbatim() {
        let mut syntax = TypeSyntax::new().unwrap();
        assert_eq!(type_expr(&json!("Array<string>"), "result.tx", &mut syntax).unwrap(), "Array<string>");
    }

    #[test]
    fn test_nested_object_descriptor() {
        let mut syntax = TypeSyntax::new().unwrap();
        let value = json!({ "amount": "number", "script-type": "string" });
        assert_eq!(
            type_expr(&value, "result.vout", &mut syntax).unwrap(),
            "{ amount: number; \"script-type\": string }"
        );
    }

    #[test]
    fn test_array_descriptor() {
        let mut syntax = TypeSyntax::new().unwrap();
        let value = json!([{ "txid": "string", "vout": "number" }]);
        assert_eq!(
            type_expr(&value, "result.inputs", &mut syntax).unwrap(),
            "Array<{ txid: string; vout: number }>"
        );
    }

    #[test]
    fn test_malformed_descriptors() {
        let mut syntax = TypeSyntax::new().unwrap();
        for value in [json!(42), json!(true), json!(null), json!([]), json!(["a", "b"]), json!("Array<")] {
            let err = type_expr(&value, "result.x", &mut syntax).unwrap_err();
            assert!(matches!(err, EntryError::MalformedShape { .. }), "{:?}", value);
        }
    }

    #[test]
    fn test_error_path_points_at_nested_field() {
        let mut syntax = TypeSyntax::new().unwrap();
        let value = json!({ "outer": { "inner": 7 } });
        let err = type_expr(&value, "result", &mut syntax).unwrap_err();
        assert_eq!(
            err,
            EntryError::MalformedShape {
                path: "result.outer.inner".to_string(),
                message: "7 is not a type descriptor".to_string(),
            }
        );
    }
}
