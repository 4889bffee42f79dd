//! Python backend

use super::{Backend, ENDL, Program, Target, indent_block, is_endl};
use crate::analyze::DocKind;
use crate::scope::ScopeKind;
use crate::types::{Param, ParamType, Signature, TypeExpr, TypeTable};

const PRIMITIVES: &[(&str, &str)] = &[
    ("int", "int"),
    ("float", "float"),
    ("string", "str"),
    ("bool", "bool"),
    ("char", "str"),
];

const RENAMES: &[(&str, &str)] = &[
    ("puissance(", "pow("),
    ("racine(", "sqrt("),
    ("aleatoire(", "random("),
];

pub struct PythonBackend {
    types: TypeTable,
}

impl PythonBackend {
    pub fn new() -> Self {
        Self {
            types: TypeTable::new(PRIMITIVES, "None", "list", "None"),
        }
    }

    fn type_name(&self, expr: &TypeExpr) -> String {
        match expr {
            TypeExpr::Named(name) => self.types.resolve(name).to_string(),
            TypeExpr::Array { .. } => self.types.sequence().to_string(),
            TypeExpr::Struct(name) => name.clone(),
        }
    }

    /// Python has no by-reference parameters; the marker is dropped
    fn annotation(&self, ty: &ParamType) -> String {
        self.type_name(&ty.expr)
    }

    fn typed_name(&self, param: &Param) -> String {
        format!("{}: {}", param.name, self.annotation(&param.ty))
    }
}

impl Default for PythonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for PythonBackend {
    fn target(&self) -> Target {
        Target::Python
    }

    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn renames(&self) -> &'static [(&'static str, &'static str)] {
        RENAMES
    }

    fn connectives(&self) -> [&'static str; 3] {
        ["and", "or", "not"]
    }

    fn comment(&self, text: &str) -> String {
        format!("# {}", text)
    }

    fn declare(&self, ty: &str, names: &[String], value: Option<&str>) -> String {
        match (names, value) {
            ([name, ..], Some(value)) => format!("{}: {} = {}", name, ty, value),
            ([name], None) => format!("{}: {} = {}", name, ty, self.types.no_value()),
            _ => format!("{} = {}", names.join(" = "), self.types.no_value()),
        }
    }

    fn for_loop(&self, var: &str, min: &str, max: &str, step: Option<&str>) -> String {
        match step {
            Some(step) => format!("for {} in range({}, {}, {}):", var, min, max, step),
            None => format!("for {} in range({}, {}):", var, min, max),
        }
    }

    fn foreach(&self, item: &Param, source: &str) -> String {
        format!("for {} in {}:", item.name, source)
    }

    fn while_loop(&self, condition: &str) -> String {
        format!("while {}:", condition)
    }

    fn if_branch(&self, condition: &str) -> String {
        format!("if {}:", condition)
    }

    fn elif_branch(&self, condition: &str) -> String {
        format!("elif {}:", condition)
    }

    fn else_branch(&self) -> String {
        "else:".to_string()
    }

    fn switch(&self, expr: &str) -> String {
        format!("match {}:", expr)
    }

    fn case(&self, expr: &str) -> String {
        format!("case {}:", expr)
    }

    fn default_case(&self) -> String {
        "case _:".to_string()
    }

    fn end(&self, _closed: ScopeKind) -> String {
        String::new()
    }

    fn empty_block(&self, kind: ScopeKind) -> Option<String> {
        match kind {
            // `match` needs at least one case
            ScopeKind::Switch => Some("case _:\n\tpass".to_string()),
            _ => Some("pass".to_string()),
        }
    }

    fn print(&self, args: &[String]) -> String {
        if args.is_empty() {
            return "print(end='')".to_string();
        }
        let args: Vec<String> = args
            .iter()
            .map(|arg| {
                if is_endl(arg) {
                    format!("\"{}\"", ENDL)
                } else {
                    arg.clone()
                }
            })
            .collect();
        format!("print({}, end='', sep='')", args.join(", "))
    }

    fn input(&self, var: &str) -> String {
        format!(
            "{var} = input('')\ntry:\n\t{var} = eval({var})\nexcept Exception:\n\tpass",
            var = var
        )
    }

    fn function(&self, signature: &Signature) -> String {
        let params: Vec<String> = signature
            .params
            .iter()
            .map(|param| self.typed_name(param))
            .collect();
        let returns = match &signature.returns {
            Some(expr) => self.type_name(expr),
            None => self.types.void().to_string(),
        };
        format!("def {}({}) -> {}:", signature.name, params.join(", "), returns)
    }

    fn return_value(&self, expr: &str) -> String {
        if expr.is_empty() {
            "return".to_string()
        } else {
            format!("return {}", expr)
        }
    }

    fn array(&self, _element: &str, name: &str, dims: &[String]) -> String {
        let value = dims.iter().rev().fold("0".to_string(), |inner, dim| {
            format!("[{} for _ in range({})]", inner, dim)
        });
        format!("{} = {}", name, value)
    }

    fn structure(&self, name: &str, fields: &[Param]) -> String {
        let mut out = format!("@dataclass\nclass {}:", name);
        if fields.is_empty() {
            out.push_str("\n\tpass");
        }
        for field in fields {
            out.push_str(&format!(
                "\n\t{} = {}",
                self.typed_name(field),
                self.types.no_value()
            ));
        }
        out
    }

    fn init(&self, structure: &str, var: &str, fields: &[(String, String)]) -> String {
        let args: Vec<String> = fields
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        format!("{} = {}({})", var, structure, args.join(", "))
    }

    fn exit_code(&self, code: &str) -> String {
        format!("raise SystemExit({})", code)
    }

    fn doc(&self, kind: DocKind, text: &str) -> String {
        format!("# {} : {}", kind.label(), text)
    }

    fn assemble(&self, program: &Program<'_>, indent: &str) -> String {
        let usage = program.usage;
        let mut out = String::new();

        let imports = [
            (usage.structures, "from dataclasses import dataclass"),
            (usage.sqrt, "from math import sqrt"),
            (usage.random, "from random import random"),
        ];
        let mut has_imports = false;
        for (_, import) in imports.iter().filter(|(used, _)| *used) {
            out.push_str(import);
            out.push('\n');
            has_imports = true;
        }
        if has_imports {
            out.push('\n');
        }

        for structure in &program.declarations {
            out.push_str(structure);
            out.push_str("\n\n");
        }
        for function in &program.functions {
            out.push_str(&function.join("\n"));
            out.push_str("\n\n");
        }

        out.push_str("if __name__ == '__main__':\n");
        if !program.main.iter().any(|line| has_statement(line)) {
            out.push_str(indent);
            out.push_str("pass\n");
        }
        for line in &program.main {
            out.push_str(&indent_block(line, indent));
            out.push('\n');
        }
        out
    }
}

/// Whether a rewritten fragment holds more than comments
fn has_statement(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim_start();
        !line.is_empty() && !line.starts_with('#')
    })
}
