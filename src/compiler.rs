//! Compiler facade
//!
//! Drives the analyzer over a whole source text and hands the result to
//! the backend's assembler. A [`Compiler`] can be reused; every call to
//! [`Compiler::compile`] starts from a clean state.

use crate::analyze::{Analyzer, CompiledLine};
use crate::codegen::{Backend, Program, Target, Usage};
use crate::common::source_lines;
use crate::config::CompileOptions;
use crate::diagnostics::CompileError;

/// Output text, or the first error of the compilation
pub type CompilationResult = Result<String, CompileError>;

pub struct Compiler {
    analyzer: Analyzer,
}

impl Compiler {
    /// Compiler for `target` with default options
    pub fn new(target: Target) -> Self {
        Self::with_options(target, &CompileOptions::default())
    }

    pub fn with_options(target: Target, options: &CompileOptions) -> Self {
        Self::with_backend(target.backend(), options)
    }

    pub fn with_backend(backend: Box<dyn Backend>, options: &CompileOptions) -> Self {
        Self {
            analyzer: Analyzer::new(backend, options),
        }
    }

    pub fn target(&self) -> Target {
        self.analyzer.backend().target()
    }

    /// Compile a whole source text.
    ///
    /// Every line is analyzed even after an error; the earliest error is
    /// the one returned.
    pub fn compile(&mut self, source: &str) -> CompilationResult {
        self.analyzer.reset();
        for line in source_lines(source) {
            self.analyzer.analyze(line);
        }
        self.analyzer.finish();

        let reporter = self.analyzer.reporter();
        tracing::debug!(
            backend = %self.target(),
            lines = self.analyzer.lines().len(),
            errors = reporter.error_count(),
            "compiled"
        );
        if let Some(error) = reporter.first() {
            return Err(error.clone());
        }

        let usage = Usage::scan(source).merged(self.analyzer.usage());
        let program = Program::from_lines(self.analyzer.lines(), usage);
        Ok(self
            .analyzer
            .backend()
            .assemble(&program, self.analyzer.indent()))
    }

    /// Line buffer of the last compilation, one entry per source line
    pub fn lines(&self) -> &[CompiledLine] {
        self.analyzer.lines()
    }

    /// Every error of the last compilation, in the order they were raised
    pub fn errors(&self) -> &[CompileError] {
        self.analyzer.reporter().errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuse_resets_state() {
        let mut compiler = Compiler::new(Target::Python);
        assert!(compiler.compile("if x\n").is_err());
        let output = compiler.compile("int a\n").unwrap();
        assert!(output.contains("a: int = None"));
        assert!(compiler.errors().is_empty());
    }

    #[test]
    fn test_line_buffer_matches_input() {
        let mut compiler = Compiler::new(Target::Cpp);
        compiler.compile("int a\n\nfor i 0 3\nend\n").unwrap();
        assert_eq!(compiler.lines().len(), 5);
    }
}
