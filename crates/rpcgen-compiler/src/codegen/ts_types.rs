//! TypeScript declaration rendering.

use crate::synth::{property_key, ResultKind, ResultTypeDecl};

/// Renders a result type declaration at module level.
pub fn render_result_type(decl: &ResultTypeDecl) -> String {
    match &decl.kind {
        ResultKind::Void => format!("export type {} = void;\n", decl.name),
        ResultKind::Alias(ty) => format!("export type {} = {};\n", decl.name, ty),
        ResultKind::Record(fields) => {
            let mut output = format!("export interface {} {{\n", decl.name);
            for field in fields {
                output.push_str(&format!("  {}: {};\n", property_key(&field.name), field.typ));
            }
            output.push_str("}\n");
            output
        }
    }
}

/// Renders a JSDoc block. Returns an empty string when there are no lines.
pub fn render_jsdoc(lines: &[String], indent: &str) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut output = format!("{}/**\n", indent);
    for line in lines {
        let line = line.replace("*/", "*\\/");
        if line.is_empty() {
            output.push_str(&format!("{} *\n", indent));
        } else {
            output.push_str(&format!("{} * {}\n", indent, line));
        }
    }
    output.push_str(&format!("{} */\n", indent));
    output
}
