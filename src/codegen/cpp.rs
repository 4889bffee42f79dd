//! C++ backend
//!
//! Emits a single translation unit. Top-level statements land in
//! `main`, functions and structures are hoisted above it. Grapic calls
//! are supported and pull in `<Grapic.h>` once a window is opened.

use super::{Backend, Program, Target, indent_block, is_endl};
use crate::analyze::{DocKind, GraphicsOp};
use crate::scope::ScopeKind;
use crate::types::{Param, Signature, TypeExpr, TypeTable};

const PRIMITIVES: &[(&str, &str)] = &[
    ("int", "int"),
    ("float", "float"),
    ("string", "string"),
    ("bool", "bool"),
    ("char", "char"),
];

const RENAMES: &[(&str, &str)] = &[
    ("puissance(", "pow("),
    ("racine(", "sqrt("),
    ("aleatoire(", "((double) rand() / RAND_MAX"),
    ("wdisplay(", "winDisplay("),
    ("etime(", "elapsedTime("),
];

/// Tokens introducing the target variable of `img`
const IMAGE_ARROWS: [&str; 2] = ["->", "<-"];

pub struct CppBackend {
    types: TypeTable,
}

impl CppBackend {
    pub fn new() -> Self {
        Self {
            types: TypeTable::new(PRIMITIVES, "{}", "auto", "void").with("image", "Image"),
        }
    }

    fn type_name(&self, expr: &TypeExpr) -> String {
        match expr {
            TypeExpr::Named(name) => self.types.resolve(name).to_string(),
            TypeExpr::Struct(name) => name.clone(),
            TypeExpr::Array { .. } => self.types.sequence().to_string(),
        }
    }

    /// `type name` with references and array extents in C++ order
    fn declarator(&self, param: &Param) -> String {
        let by_ref = if param.ty.by_ref { "&" } else { "" };
        match &param.ty.expr {
            TypeExpr::Array {
                element: Some(element),
                dims,
            } if !dims.is_empty() => format!(
                "{} {}{}",
                self.types.resolve(element),
                param.name,
                extents(dims)
            ),
            expr => format!("{}{} {}", self.type_name(expr), by_ref, param.name),
        }
    }
}

impl Default for CppBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn extents(dims: &[String]) -> String {
    dims.iter().map(|dim| format!("[{}]", dim)).collect()
}

fn call(name: &str, args: &[String]) -> String {
    format!("{}({});", name, args.join(", "))
}

impl Backend for CppBackend {
    fn target(&self) -> Target {
        Target::Cpp
    }

    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn strict_by_default(&self) -> bool {
        true
    }

    fn supports_graphics(&self) -> bool {
        true
    }

    fn renames(&self) -> &'static [(&'static str, &'static str)] {
        RENAMES
    }

    fn connectives(&self) -> [&'static str; 3] {
        ["&&", "||", "!"]
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}", text)
    }

    fn declare(&self, ty: &str, names: &[String], value: Option<&str>) -> String {
        match (names, value) {
            ([name, ..], Some(value)) => format!("{} {} = {};", ty, name, value),
            _ => {
                let names: Vec<String> = names
                    .iter()
                    .map(|name| format!("{}{}", name, self.types.no_value()))
                    .collect();
                format!("{} {};", ty, names.join(", "))
            }
        }
    }

    fn for_loop(&self, var: &str, min: &str, max: &str, step: Option<&str>) -> String {
        let increment = match step {
            Some(step) => format!("{} += {}", var, step),
            None => format!("{}++", var),
        };
        format!(
            "for (int {var} = {min}; {var} < {max}; {increment}) {{",
            var = var,
            min = min,
            max = max,
            increment = increment
        )
    }

    fn foreach(&self, item: &Param, source: &str) -> String {
        let by_ref = if item.ty.by_ref { "&" } else { "" };
        format!(
            "for ({}{} {} : {}) {{",
            self.type_name(&item.ty.expr),
            by_ref,
            item.name,
            source
        )
    }

    fn while_loop(&self, condition: &str) -> String {
        format!("while ({}) {{", condition)
    }

    fn if_branch(&self, condition: &str) -> String {
        format!("if ({}) {{", condition)
    }

    fn elif_branch(&self, condition: &str) -> String {
        format!("}} else if ({}) {{", condition)
    }

    fn else_branch(&self) -> String {
        "} else {".to_string()
    }

    fn switch(&self, expr: &str) -> String {
        format!("switch ({}) {{", expr)
    }

    fn case(&self, expr: &str) -> String {
        format!("case {}: {{", expr)
    }

    fn default_case(&self) -> String {
        "default: {".to_string()
    }

    fn end(&self, closed: ScopeKind) -> String {
        match closed {
            ScopeKind::Case | ScopeKind::Default => "\tbreak;\n}".to_string(),
            _ => "}".to_string(),
        }
    }

    fn print(&self, args: &[String]) -> String {
        if args.is_empty() {
            return "cout << flush;".to_string();
        }
        let args: Vec<&str> = args
            .iter()
            .map(|arg| if is_endl(arg) { "endl" } else { arg.as_str() })
            .collect();
        format!("cout << {};", args.join(" << "))
    }

    fn input(&self, var: &str) -> String {
        format!("cin >> {};", var)
    }

    fn function(&self, signature: &Signature) -> String {
        let params: Vec<String> = signature
            .params
            .iter()
            .map(|param| self.declarator(param))
            .collect();
        let returns = match &signature.returns {
            Some(expr) => self.type_name(expr),
            None => self.types.void().to_string(),
        };
        format!("{} {}({}) {{", returns, signature.name, params.join(", "))
    }

    fn return_value(&self, expr: &str) -> String {
        if expr.is_empty() {
            "return;".to_string()
        } else {
            format!("return {};", expr)
        }
    }

    fn array(&self, element: &str, name: &str, dims: &[String]) -> String {
        format!(
            "{} {}{} = {{}};",
            self.types.resolve(element),
            name,
            extents(dims)
        )
    }

    fn structure(&self, name: &str, fields: &[Param]) -> String {
        let mut out = format!("struct {} {{", name);
        for field in fields {
            out.push_str(&format!("\n\t{};", self.declarator(field)));
        }
        out.push_str("\n};");
        out
    }

    fn init(&self, structure: &str, var: &str, fields: &[(String, String)]) -> String {
        let mut out = format!("{} {};", structure, var);
        for (field, value) in fields {
            out.push_str(&format!("\n{}.{} = {};", var, field, value));
        }
        out
    }

    fn exit_code(&self, code: &str) -> String {
        format!("return {};", code)
    }

    fn doc(&self, kind: DocKind, text: &str) -> String {
        format!("// {} : {}", kind.label(), text)
    }

    fn graphics(&self, op: GraphicsOp, args: &[String]) -> Option<String> {
        if op == GraphicsOp::Image {
            if let [path @ .., arrow, var] = args {
                if !path.is_empty() && IMAGE_ARROWS.contains(&arrow.as_str()) {
                    return Some(format!("Image {} = image({});", var, path.join(" ")));
                }
            }
            return Some(format!("image({});", args.join(" ")));
        }
        Some(call(op.function_name(), args))
    }

    fn passthrough(&self, text: &str) -> String {
        if text.ends_with(';') || text.ends_with('{') || text.ends_with('}') {
            text.to_string()
        } else {
            format!("{};", text)
        }
    }

    fn assemble(&self, program: &Program<'_>, indent: &str) -> String {
        let usage = program.usage;
        let mut out = String::from("#include <iostream>\n#include <string>\n");
        if usage.math() {
            out.push_str("#include <cmath>\n");
        }
        if usage.random {
            out.push_str("#include <cstdlib>\n");
        }
        if usage.window {
            out.push_str("#include <Grapic.h>\n");
        }
        out.push_str("\nusing namespace std;\n");
        if usage.window {
            out.push_str("using namespace grapic;\n");
        }
        out.push('\n');

        for structure in &program.declarations {
            out.push_str(structure);
            out.push_str("\n\n");
        }
        for function in &program.functions {
            out.push_str(&function.join("\n"));
            out.push_str("\n\n");
        }

        out.push_str("int main() {\n");
        for line in &program.main {
            out.push_str(&indent_block(line, indent));
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str("return 0;\n}\n");
        out
    }
}
