//! Algorithmic backend: a French prose rendering of the program
//!
//! The output is meant to be read, not executed. Boolean connectives
//! are kept as written (`ET`, `OU`, `NON`) and graphics calls are
//! described in words.

use super::{Backend, Program, Target, indent_block, is_endl};
use crate::analyze::{DocKind, GraphicsOp};
use crate::scope::ScopeKind;
use crate::types::{Param, Signature, TypeExpr, TypeTable};

const PRIMITIVES: &[(&str, &str)] = &[
    ("int", "entier"),
    ("float", "réel"),
    ("string", "chaîne de caractères"),
    ("bool", "booléen"),
    ("char", "caractère"),
];

const RENAMES: &[(&str, &str)] = &[
    ("wdisplay(", "AfficherFenêtre("),
    ("etime(", "TempsÉcoulé("),
];

const BY_REF_SUFFIX: &str = " en donnée/résultat";

pub struct AlgorithmicBackend {
    types: TypeTable,
}

impl AlgorithmicBackend {
    pub fn new() -> Self {
        Self {
            types: TypeTable::new(PRIMITIVES, "", "Tableau", "").with("image", "Image"),
        }
    }

    fn type_name(&self, expr: &TypeExpr) -> String {
        match expr {
            TypeExpr::Named(name) => self.types.resolve(name).to_string(),
            TypeExpr::Struct(name) => format!("Structure {}", name),
            TypeExpr::Array { element, dims } => {
                let mut out = self.types.sequence().to_string();
                for dim in dims {
                    out.push_str(&format!("[{}]", dim));
                }
                if let Some(element) = element {
                    out.push_str(" de ");
                    out.push_str(&plural(self.types.resolve(element)));
                }
                out
            }
        }
    }

    fn typed_name(&self, param: &Param) -> String {
        let suffix = if param.ty.by_ref { BY_REF_SUFFIX } else { "" };
        format!("{} : {}{}", param.name, self.type_name(&param.ty.expr), suffix)
    }
}

impl Default for AlgorithmicBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn plural(word: &str) -> String {
    if word.ends_with('s') {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// `args[range]` joined with commas, empty when out of range
fn joined(args: &[String], from: usize, to: usize) -> String {
    args.get(from..to.min(args.len()))
        .unwrap_or_default()
        .join(", ")
}

fn arg(args: &[String], index: usize) -> &str {
    args.get(index).map(String::as_str).unwrap_or_default()
}

impl Backend for AlgorithmicBackend {
    fn target(&self) -> Target {
        Target::Algorithmic
    }

    fn types(&self) -> &TypeTable {
        &self.types
    }

    fn supports_graphics(&self) -> bool {
        true
    }

    fn renames(&self) -> &'static [(&'static str, &'static str)] {
        RENAMES
    }

    fn connectives(&self) -> [&'static str; 3] {
        ["ET", "OU", "NON"]
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}", text)
    }

    fn declare(&self, ty: &str, names: &[String], value: Option<&str>) -> String {
        match (names, value) {
            ([name, ..], Some(value)) => format!("{} : {} ← {}", name, ty, value),
            _ => format!("{} : {}", names.join(", "), ty),
        }
    }

    fn for_loop(&self, var: &str, min: &str, max: &str, step: Option<&str>) -> String {
        match step {
            Some(step) => format!(
                "Pour {} allant de {} à {} (exclu) par pas de {} faire",
                var, min, max, step
            ),
            None => format!("Pour {} allant de {} à {} (exclu) faire", var, min, max),
        }
    }

    fn foreach(&self, item: &Param, source: &str) -> String {
        let suffix = if item.ty.by_ref { BY_REF_SUFFIX } else { "" };
        format!(
            "Pour chaque élément de {} stockés dans {}{} (type {})",
            source,
            item.name,
            suffix,
            self.type_name(&item.ty.expr)
        )
    }

    fn while_loop(&self, condition: &str) -> String {
        format!("Tant que {} faire", condition)
    }

    fn if_branch(&self, condition: &str) -> String {
        format!("Si {} alors", condition)
    }

    fn elif_branch(&self, condition: &str) -> String {
        format!("Sinon si {} alors", condition)
    }

    fn else_branch(&self) -> String {
        "Sinon".to_string()
    }

    fn switch(&self, expr: &str) -> String {
        format!("Selon {} :", expr)
    }

    fn case(&self, expr: &str) -> String {
        format!("Cas {} :", expr)
    }

    fn default_case(&self) -> String {
        "Autre cas :".to_string()
    }

    fn end(&self, closed: ScopeKind) -> String {
        let label = match closed {
            ScopeKind::For | ScopeKind::Foreach => "Fin Pour",
            ScopeKind::While => "Fin Tant que",
            ScopeKind::If => "Fin Si",
            ScopeKind::Switch => "Fin Selon",
            ScopeKind::Case | ScopeKind::Default => "Fin Cas",
            ScopeKind::Function => "Fin Fonction",
            ScopeKind::Procedure => "Fin Procédure",
        };
        label.to_string()
    }

    fn print(&self, args: &[String]) -> String {
        let args: Vec<&str> = args
            .iter()
            .map(|arg| {
                if is_endl(arg) {
                    "retour à la ligne"
                } else {
                    arg.as_str()
                }
            })
            .collect();
        if args.is_empty() {
            "Afficher".to_string()
        } else {
            format!("Afficher {}", args.join(", "))
        }
    }

    fn input(&self, var: &str) -> String {
        format!("Saisir {}", var)
    }

    fn function(&self, signature: &Signature) -> String {
        let params: Vec<String> = signature
            .params
            .iter()
            .map(|param| self.typed_name(param))
            .collect();
        match &signature.returns {
            Some(expr) => format!(
                "Fonction {}({}) : {}",
                signature.name,
                params.join(", "),
                self.type_name(expr)
            ),
            None => format!("Procédure {}({})", signature.name, params.join(", ")),
        }
    }

    fn return_value(&self, expr: &str) -> String {
        format!("Retourner {}", expr).trim_end().to_string()
    }

    fn array(&self, element: &str, name: &str, dims: &[String]) -> String {
        let ty = TypeExpr::Array {
            element: Some(element.to_string()),
            dims: dims.to_vec(),
        };
        format!("{} : {} initialisé à 0", name, self.type_name(&ty))
    }

    fn structure(&self, name: &str, fields: &[Param]) -> String {
        if fields.is_empty() {
            return format!("Structure {}", name);
        }
        let fields: Vec<String> = fields.iter().map(|field| self.typed_name(field)).collect();
        format!("Structure {} : {}", name, fields.join(", "))
    }

    fn init(&self, structure: &str, var: &str, fields: &[(String, String)]) -> String {
        let head = format!("Initialisation de {} (Structure {})", var, structure);
        if fields.is_empty() {
            return head;
        }
        let fields: Vec<String> = fields
            .iter()
            .map(|(field, value)| format!("{} = {}", field, value))
            .collect();
        format!("{} avec {}", head, fields.join(", "))
    }

    fn exit_code(&self, code: &str) -> String {
        format!("Code de retour : {}", code)
    }

    fn doc(&self, kind: DocKind, text: &str) -> String {
        format!("{} : {}", kind.label(), text)
    }

    fn graphics(&self, op: GraphicsOp, args: &[String]) -> Option<String> {
        let text = match op {
            GraphicsOp::WinInit => format!(
                "Initialisation de la fenêtre avec pour nom {}, largeur {}, et hauteur {}",
                arg(args, 0),
                arg(args, 1),
                arg(args, 2)
            ),
            GraphicsOp::WinClear => "Effaçage de la fenêtre".to_string(),
            GraphicsOp::WinDisplay => "Affichage de la fenêtre".to_string(),
            GraphicsOp::WinQuit => "Fermeture de la fenêtre".to_string(),
            GraphicsOp::Color => format!("Changement de la couleur vers ({})", args.join(", ")),
            GraphicsOp::BackgroundColor => format!(
                "Changement de la couleur d'arrière plan vers ({})",
                args.join(", ")
            ),
            GraphicsOp::PressSpace => "Attente d'un appui sur Espace de l'utilisateur".to_string(),
            GraphicsOp::Circle => format!(
                "Trace un cercle de centre ({}) et de rayon {}",
                joined(args, 0, 2),
                arg(args, 2)
            ),
            GraphicsOp::CircleFill => format!(
                "Trace un cercle REMPLI de centre ({}) et de rayon {}",
                joined(args, 0, 2),
                arg(args, 2)
            ),
            GraphicsOp::Line => format!(
                "Trace une ligne de ({}) à ({})",
                joined(args, 0, 2),
                joined(args, 2, 4)
            ),
            GraphicsOp::Rectangle => format!(
                "Trace un rectangle de ({}) à ({})",
                joined(args, 0, 2),
                joined(args, 2, 4)
            ),
            GraphicsOp::RectangleFill => format!(
                "Trace un rectangle REMPLI de ({}) à ({})",
                joined(args, 0, 2),
                joined(args, 2, 4)
            ),
            GraphicsOp::PutPixel => format!(
                "Pose un pixel sur la fenêtre aux coordonnées ({}) avec une couleur ({})",
                joined(args, 0, 2),
                joined(args, 2, args.len())
            ),
            GraphicsOp::Delay => format!("Attendre {} ms", arg(args, 0)),
            GraphicsOp::Image => match args {
                [path @ .., arrow, var] if !path.is_empty() && (arrow == "->" || arrow == "<-") => {
                    format!(
                        "Charge l'image au chemin {} dans la variable {}",
                        path.join(" "),
                        var
                    )
                }
                _ => format!("Charge l'image au chemin {}", args.join(" ")),
            },
        };
        Some(text)
    }

    fn assemble(&self, program: &Program<'_>, indent: &str) -> String {
        let mut out = String::new();
        for structure in &program.declarations {
            out.push_str(structure);
            out.push_str("\n\n");
        }
        for function in &program.functions {
            out.push_str(&function.join("\n"));
            out.push_str("\n\n");
        }
        out.push_str("Algorithme principal\nDébut\n");
        for line in &program.main {
            out.push_str(&indent_block(line, indent));
            out.push('\n');
        }
        out.push_str("Fin\n");
        out
    }
}
