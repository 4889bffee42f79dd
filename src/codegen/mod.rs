//! Code generation backends
//!
//! Each target language implements [`Backend`]: one rewrite method per
//! instruction kind plus [`Backend::assemble`] for the final program.
//! The analyzer owns scope bookkeeping and validation, so backends only
//! produce text.
//!
//! Rewrites may span several lines. A continuation line starting with
//! tab characters is indented one extra level per tab, relative to the
//! line's own depth.

mod algorithmic;
mod assemble;
mod cpp;
mod python;

pub use algorithmic::AlgorithmicBackend;
pub use assemble::{Program, Usage, indent_block, indent_fragment};
pub use cpp::CppBackend;
pub use python::PythonBackend;

use crate::analyze::{DocKind, GraphicsOp};
use crate::scope::ScopeKind;
use crate::types::{Param, Signature, TypeTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Newline token of the DSL, valid inside and outside string literals
pub const ENDL: &str = "(ENDL)";

/// Separator between `print` arguments
pub const PRINT_SEPARATOR: &str = "&";

/// Boolean connectives of the DSL, in `ET`, `OU`, `NON` order
pub const DSL_CONNECTIVES: [&str; 3] = ["ET", "OU", "NON"];

/// Target language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Python,
    Cpp,
    Algorithmic,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Python, Target::Cpp, Target::Algorithmic];

    pub fn name(&self) -> &'static str {
        match self {
            Target::Python => "python",
            Target::Cpp => "cpp",
            Target::Algorithmic => "algorithmic",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Target::Python => "py",
            Target::Cpp => "cpp",
            Target::Algorithmic => "algo",
        }
    }

    /// Fresh backend for this target
    pub fn backend(&self) -> Box<dyn Backend> {
        match self {
            Target::Python => Box::new(PythonBackend::new()),
            Target::Cpp => Box::new(CppBackend::new()),
            Target::Algorithmic => Box::new(AlgorithmicBackend::new()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Target::Python),
            "cpp" | "c++" => Ok(Target::Cpp),
            "algorithmic" | "algo" => Ok(Target::Algorithmic),
            other => Err(format!("unknown target `{}`", other)),
        }
    }
}

/// Per-target rewrite rules
pub trait Backend {
    fn target(&self) -> Target;

    fn types(&self) -> &TypeTable;

    /// Whether unknown lines are rejected when no option says otherwise
    fn strict_by_default(&self) -> bool {
        false
    }

    fn supports_graphics(&self) -> bool {
        false
    }

    /// Function renames applied to every rewritten line
    fn renames(&self) -> &'static [(&'static str, &'static str)];

    /// Replacement for [`ENDL`]
    fn newline_escape(&self) -> &'static str {
        "\\n"
    }

    /// Target spelling of `ET`, `OU`, `NON`
    fn connectives(&self) -> [&'static str; 3];

    fn comment(&self, text: &str) -> String;

    /// `names` is never empty; `value` is set for `<type> name = value`
    fn declare(&self, ty: &str, names: &[String], value: Option<&str>) -> String;

    fn for_loop(&self, var: &str, min: &str, max: &str, step: Option<&str>) -> String;

    fn foreach(&self, item: &Param, source: &str) -> String;

    fn while_loop(&self, condition: &str) -> String;

    fn if_branch(&self, condition: &str) -> String;

    fn elif_branch(&self, condition: &str) -> String;

    fn else_branch(&self) -> String;

    fn switch(&self, expr: &str) -> String;

    fn case(&self, expr: &str) -> String;

    fn default_case(&self) -> String;

    /// Text for the `end` closing a block of this kind
    fn end(&self, closed: ScopeKind) -> String;

    /// Body of a block or branch with no statement, when the target needs one.
    /// It is rendered one level below the block header.
    fn empty_block(&self, kind: ScopeKind) -> Option<String> {
        let _ = kind;
        None
    }

    /// `args` are the `&`-separated groups; a bare newline argument is [`ENDL`]
    fn print(&self, args: &[String]) -> String;

    fn input(&self, var: &str) -> String;

    fn function(&self, signature: &Signature) -> String;

    fn return_value(&self, expr: &str) -> String;

    /// `element` is the DSL type keyword; `dims` is never empty
    fn array(&self, element: &str, name: &str, dims: &[String]) -> String;

    fn structure(&self, name: &str, fields: &[Param]) -> String;

    fn init(&self, structure: &str, var: &str, fields: &[(String, String)]) -> String;

    fn exit_code(&self, code: &str) -> String;

    fn doc(&self, kind: DocKind, text: &str) -> String;

    /// Graphics call, `None` when the target has no graphics support
    fn graphics(&self, op: GraphicsOp, args: &[String]) -> Option<String> {
        let _ = (op, args);
        None
    }

    /// Line that is not an instruction (assignment, call)
    fn passthrough(&self, text: &str) -> String {
        text.to_string()
    }

    /// Stitch the partitioned lines into the output program
    fn assemble(&self, program: &Program<'_>, indent: &str) -> String;
}

/// Whether a `print` argument is the bare newline token
pub fn is_endl(arg: &str) -> bool {
    arg == ENDL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_str() {
        assert_eq!("py".parse::<Target>(), Ok(Target::Python));
        assert_eq!("C++".parse::<Target>(), Ok(Target::Cpp));
        assert_eq!("algo".parse::<Target>(), Ok(Target::Algorithmic));
        assert!("rust".parse::<Target>().is_err());
    }

    #[test]
    fn test_backend_matches_target() {
        for target in Target::ALL {
            assert_eq!(target.backend().target(), target);
        }
    }
}
