//! Algoline: compiler for the line-oriented algorithmic pseudocode DSL
//!
//! One statement per line, blocks closed by `end`:
//!
//! ```text
//! fx int add int a int b
//!     return a + b
//! end
//! int total
//! for i 1 10
//!     print total & i & (ENDL)
//! end
//! ```
//!
//! Targets:
//! - Python (loose by default)
//! - C++ with Grapic graphics support (strict by default)
//! - Algorithmic, a French prose description of the program
//!
//! # Architecture
//!
//! ```text
//! Source → lines → Lexer → Analyzer (scope stack, backend rewrite) → Assembler → Output
//! ```

pub mod analyze;
pub mod codegen;
pub mod common;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod lexer;
pub mod scope;
pub mod types;

pub use codegen::{Backend, Target};
pub use compiler::{CompilationResult, Compiler};
pub use config::{CompileOptions, Config};
pub use diagnostics::{CompileError, Reporter, SourceFile};

/// Compiler version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile source text for a target with default options
pub fn compile(source: &str, target: Target) -> CompilationResult {
    Compiler::new(target).compile(source)
}

/// Compile source text for a target
pub fn compile_with(source: &str, target: Target, options: &CompileOptions) -> CompilationResult {
    Compiler::with_options(target, options).compile(source)
}
