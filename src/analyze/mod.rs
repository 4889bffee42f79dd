//! Instruction analyzer
//!
//! The analyzer is the state machine at the heart of the compiler. For
//! each source line it:
//! - resolves the instruction kind from the first token
//! - checks parameter counts and block placement against the scope stack
//! - pushes or pops scope frames
//! - asks the backend for the rewritten text
//! - applies the final trim (renames, `(ENDL)`, indentation)
//!
//! Exactly one [`CompiledLine`] is recorded per source line, errors
//! included, so the buffer always lines up with the source.

mod instruction;

pub use instruction::{DocKind, GraphicsOp, Instruction, ParamRange};

use crate::codegen::{Backend, ENDL, PRINT_SEPARATOR, Usage, indent_fragment};
use crate::common::{SourceLine, Span};
use crate::config::CompileOptions;
use crate::diagnostics::{CompileError, Misplaced, Reporter};
use crate::lexer::{InstructionLine, lex_line};
use crate::scope::{ScopeKind, ScopeStack};
use crate::types::{Param, Signature, TypeExpr, parse_params};
use serde::Serialize;

/// Output section a compiled line belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Structure definitions
    Declarations,
    /// Function and procedure bodies, hoisted before the top level
    Functions,
    #[default]
    Main,
}

/// Rewritten text of one source line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledLine {
    /// Indented target text, empty when the line vanishes
    pub text: String,
    pub section: Section,
    /// This is the `end` of a function or procedure
    pub closes_function: bool,
    /// Source span of the line
    pub span: Span,
}

type Rewrite = Result<String, CompileError>;

/// Per-compilation analyzer state
pub struct Analyzer {
    backend: Box<dyn Backend>,
    /// One indentation level
    indent: String,
    /// Reject unknown lines
    strict: bool,
    scopes: ScopeStack,
    lines: Vec<CompiledLine>,
    reporter: Reporter,
    /// Kind of the block closed by the latest `end`
    last_closed: Option<ScopeKind>,
    /// A `winit` has been seen
    window_open: bool,
    usage: Usage,
}

impl Analyzer {
    pub fn new(backend: Box<dyn Backend>, options: &CompileOptions) -> Self {
        let strict = options.strict.unwrap_or_else(|| backend.strict_by_default());
        Self {
            backend,
            indent: options.indent.clone(),
            strict,
            scopes: ScopeStack::new(),
            lines: Vec::new(),
            reporter: Reporter::new(),
            last_closed: None,
            window_open: false,
            usage: Usage::default(),
        }
    }

    /// Forget everything about the previous compilation
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.lines.clear();
        self.reporter.clear();
        self.last_closed = None;
        self.window_open = false;
        self.usage = Usage::default();
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn lines(&self) -> &[CompiledLine] {
        &self.lines
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    /// Analyze one source line and record its compiled form
    pub fn analyze(&mut self, line: SourceLine<'_>) {
        let compiled = lex_line(line).and_then(|parsed| self.analyze_line(&parsed));
        let compiled = match compiled {
            Ok(compiled) => compiled,
            Err(error) => {
                self.reporter.error(error);
                CompiledLine {
                    span: line.span,
                    ..CompiledLine::default()
                }
            }
        };
        tracing::trace!(
            line = line.number(),
            depth = self.scopes.depth(),
            "{:?}",
            compiled.text
        );
        self.lines.push(compiled);
    }

    /// End-of-input checks
    pub fn finish(&mut self) {
        if let Some(frame) = self.scopes.top().copied() {
            let span = self
                .lines
                .get(frame.line)
                .map(|line| line.span)
                .unwrap_or_default();
            self.reporter.error(CompileError::UnclosedBlock {
                line: frame.line + 1,
                block: frame.kind,
                span: span.into(),
            });
        }
    }

    fn classify(&self, line: &InstructionLine) -> Instruction {
        if line.comment {
            return Instruction::Comment;
        }
        if line.is_blank() {
            return Instruction::Blank;
        }
        // `line = 3` assigns a variable even when its name is a keyword
        if is_assignment(line) {
            return Instruction::Other;
        }
        match Instruction::from_name(&line.name) {
            Some(Instruction::Graphics(_)) if !self.backend.supports_graphics() => {
                Instruction::Other
            }
            Some(instruction) => instruction,
            None if self.backend.types().is_declared(&line.name) => Instruction::Declare,
            None => Instruction::Other,
        }
    }

    fn analyze_line(&mut self, line: &InstructionLine) -> Result<CompiledLine, CompileError> {
        let instruction = self.classify(line);
        if instruction.fills_block() {
            self.scopes.fill();
        }
        let text = self.rewrite(instruction, line)?;
        Ok(self.final_trim(instruction, text, line))
    }

    fn rewrite(&mut self, instruction: Instruction, line: &InstructionLine) -> Rewrite {
        match instruction {
            Instruction::Blank | Instruction::FunctionStart => Ok(String::new()),
            Instruction::Comment => Ok(self.backend.comment(&line.joined())),
            Instruction::Declare => self.analyze_declaration(line),
            Instruction::For => self.analyze_for(line),
            Instruction::Foreach => self.analyze_foreach(line),
            Instruction::While => self.analyze_while(line),
            Instruction::If => self.analyze_if(line),
            Instruction::Elif => self.analyze_elif(line),
            Instruction::Else => self.analyze_else(line),
            Instruction::Switch => self.analyze_switch(line),
            Instruction::Case => self.analyze_case(line),
            Instruction::Default => self.analyze_default(line),
            Instruction::End => self.analyze_end(line),
            Instruction::Print => Ok(self.analyze_print(line)),
            Instruction::Input => self.analyze_input(line),
            Instruction::Function => self.analyze_function(line),
            Instruction::Return => self.analyze_return(line),
            Instruction::Array => self.analyze_array(line),
            Instruction::Struct => self.analyze_struct(line),
            Instruction::Init => self.analyze_init(line),
            Instruction::ExitCode => self.analyze_exit_code(line),
            Instruction::Doc(kind) => Ok(self.backend.doc(kind, &line.joined())),
            Instruction::Graphics(op) => self.analyze_graphics(op, line),
            Instruction::Other => self.analyze_other(line),
        }
    }

    /// Renames, `(ENDL)`, indentation and section of a rewritten line
    fn final_trim(
        &self,
        instruction: Instruction,
        mut text: String,
        line: &InstructionLine,
    ) -> CompiledLine {
        for (from, to) in self.backend.renames() {
            if text.contains(from) {
                text = text.replace(from, to);
            }
        }
        if text.contains(ENDL) {
            text = text.replace(ENDL, self.backend.newline_escape());
        }

        let closes_function = instruction == Instruction::End
            && self.last_closed.is_some_and(|kind| kind.is_callable());

        // Hoisted lines lose the depth of the blocks they are moved out of
        let leaves_callable = closes_function && !self.scopes.in_callable();
        let base = if instruction == Instruction::Struct || leaves_callable {
            self.scopes.depth()
        } else {
            self.scopes.callable_base().unwrap_or(0)
        };
        let depth = self
            .scopes
            .depth()
            .saturating_sub(usize::from(instruction.is_block_opener()))
            .saturating_sub(base);
        let text = indent_fragment(&text, depth, &self.indent);

        let section = if instruction == Instruction::Struct {
            Section::Declarations
        } else if closes_function || self.scopes.in_callable() {
            Section::Functions
        } else {
            Section::Main
        };

        CompiledLine {
            text,
            section,
            closes_function,
            span: line.span,
        }
    }

    // === Declarations ===

    fn analyze_declaration(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(1))?;
        let ty = self.backend.types().resolve(&line.name);
        let params = &line.params;

        if params.get(1).is_some_and(|token| token == "=") {
            expect_params(line, ParamRange::at_least(3))?;
            let value = params[2..].join(" ");
            return Ok(self.backend.declare(ty, &params[..1], Some(value.as_str())));
        }
        Ok(self.backend.declare(ty, params, None))
    }

    fn analyze_array(&mut self, line: &InstructionLine) -> Rewrite {
        if line.params.len() < 3 {
            return Err(CompileError::Arity {
                line: line.number(),
                instruction: line.name.clone(),
                reason: "does not have all its parameters set".to_string(),
                span: line.span.into(),
            });
        }
        let params = &line.params;
        Ok(self.backend.array(&params[0], &params[1], &params[2..]))
    }

    fn analyze_struct(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(1))?;
        self.usage.structures = true;
        let fields = parse_params(&line.params[1..]);
        Ok(self.backend.structure(&line.params[0], &fields))
    }

    fn analyze_init(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(2))?;
        let params = &line.params;
        let fields: Vec<(String, String)> = params[2..]
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();
        Ok(self.backend.init(&params[0], &params[1], &fields))
    }

    // === Control flow ===

    fn analyze_for(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::between(3, 4))?;
        self.scopes.push(ScopeKind::For, line.index);
        let params = &line.params;
        Ok(self.backend.for_loop(
            &params[0],
            &params[1],
            &params[2],
            params.get(3).map(String::as_str),
        ))
    }

    fn analyze_foreach(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::exactly(3))?;
        self.scopes.push(ScopeKind::Foreach, line.index);
        let params = &line.params;
        let item = Param::from_pair(&params[0], &params[1]);
        Ok(self.backend.foreach(&item, &params[2]))
    }

    fn analyze_while(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(1))?;
        self.scopes.push(ScopeKind::While, line.index);
        Ok(self.backend.while_loop(&self.condition(line)))
    }

    fn analyze_if(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(1))?;
        self.scopes.push(ScopeKind::If, line.index);
        Ok(self.backend.if_branch(&self.condition(line)))
    }

    fn analyze_elif(&mut self, line: &InstructionLine) -> Rewrite {
        self.expect_open_if(line)?;
        expect_params(line, ParamRange::at_least(1))?;
        let header = self.backend.elif_branch(&self.condition(line));
        Ok(self.close_branch(header))
    }

    fn analyze_else(&mut self, line: &InstructionLine) -> Rewrite {
        self.expect_open_if(line)?;
        let header = self.backend.else_branch();
        Ok(self.close_branch(header))
    }

    /// Prefix a branch header with the filler of an empty previous branch
    fn close_branch(&mut self, header: String) -> String {
        if self.scopes.next_branch() {
            return header;
        }
        match self.backend.empty_block(ScopeKind::If) {
            Some(filler) => format!("{}\n{}", nested(&filler), header),
            None => header,
        }
    }

    fn analyze_switch(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(1))?;
        self.scopes.push(ScopeKind::Switch, line.index);
        Ok(self.backend.switch(&line.joined()))
    }

    fn analyze_case(&mut self, line: &InstructionLine) -> Rewrite {
        self.expect_switch(line)?;
        expect_params(line, ParamRange::at_least(1))?;
        self.scopes.push(ScopeKind::Case, line.index);
        Ok(self.backend.case(&line.joined()))
    }

    fn analyze_default(&mut self, line: &InstructionLine) -> Rewrite {
        self.expect_switch(line)?;
        self.scopes.push(ScopeKind::Default, line.index);
        Ok(self.backend.default_case())
    }

    fn analyze_end(&mut self, line: &InstructionLine) -> Rewrite {
        let frame = self.scopes.pop().ok_or_else(|| CompileError::UnmatchedEnd {
            line: line.number(),
            span: line.span.into(),
        })?;
        self.last_closed = Some(frame.kind);
        let end = self.backend.end(frame.kind);
        if frame.filled {
            return Ok(end);
        }
        Ok(match self.backend.empty_block(frame.kind) {
            Some(filler) if end.is_empty() => nested(&filler),
            Some(filler) => format!("{}\n{}", nested(&filler), end),
            None => end,
        })
    }

    /// Condition tokens with the DSL connectives translated
    fn condition(&self, line: &InstructionLine) -> String {
        rewrite_connectives(&line.params, &self.backend.connectives())
    }

    fn expect_switch(&self, line: &InstructionLine) -> Result<(), CompileError> {
        if self.scopes.contains(ScopeKind::Switch) {
            Ok(())
        } else {
            Err(misplaced(line, Misplaced::OutsideSwitch))
        }
    }

    fn expect_open_if(&self, line: &InstructionLine) -> Result<(), CompileError> {
        match self.scopes.top() {
            Some(frame) if frame.kind == ScopeKind::If => Ok(()),
            _ => Err(misplaced(line, Misplaced::OutsideIf)),
        }
    }

    // === Input / output ===

    fn analyze_print(&mut self, line: &InstructionLine) -> String {
        self.backend.print(&print_args(&line.params))
    }

    fn analyze_input(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::exactly(1))?;
        Ok(self.backend.input(&line.params[0]))
    }

    // === Functions ===

    fn analyze_function(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::at_least(2))?;
        let params = &line.params;
        let returns = match params[0].as_str() {
            "void" => None,
            ty => Some(TypeExpr::parse(ty)),
        };
        let kind = if returns.is_some() {
            ScopeKind::Function
        } else {
            ScopeKind::Procedure
        };
        self.scopes.push(kind, line.index);

        let signature = Signature {
            name: params[1].clone(),
            returns,
            params: parse_params(&params[2..]),
        };
        Ok(self.backend.function(&signature))
    }

    fn analyze_return(&mut self, line: &InstructionLine) -> Rewrite {
        if self.scopes.contains(ScopeKind::Procedure) {
            return Err(misplaced(line, Misplaced::InProcedure));
        }
        if !self.scopes.contains(ScopeKind::Function) {
            return Err(misplaced(line, Misplaced::OutsideFunction));
        }
        Ok(self.backend.return_value(&line.joined()))
    }

    fn analyze_exit_code(&mut self, line: &InstructionLine) -> Rewrite {
        expect_params(line, ParamRange::exactly(1))?;
        Ok(self.backend.exit_code(&line.params[0]))
    }

    // === Graphics ===

    fn analyze_graphics(&mut self, op: GraphicsOp, line: &InstructionLine) -> Rewrite {
        if op != GraphicsOp::WinInit && !self.window_open {
            return Err(CompileError::WindowNotOpen {
                line: line.number(),
                instruction: line.name.clone(),
                span: line.span.into(),
            });
        }
        expect_params(line, op.params())?;
        if op == GraphicsOp::WinInit {
            self.window_open = true;
            self.usage.window = true;
        }
        match self.backend.graphics(op, &line.params) {
            Some(text) => Ok(text),
            None => self.analyze_other(line),
        }
    }

    // === Everything else ===

    fn analyze_other(&mut self, line: &InstructionLine) -> Rewrite {
        let call = line.name.contains('(');
        if is_assignment(line) || call || !self.strict {
            Ok(self.backend.passthrough(line.text()))
        } else {
            Err(CompileError::UnknownInstruction {
                line: line.number(),
                token: line.name.clone(),
                span: line.span.into(),
            })
        }
    }
}

/// One level deeper than the line it is attached to
fn nested(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("\t{}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First parameter ends with `=` (`x = 1`, `x += 1`)
fn is_assignment(line: &InstructionLine) -> bool {
    line.params.first().is_some_and(|token| token.ends_with('='))
}

fn expect_params(line: &InstructionLine, expected: ParamRange) -> Result<(), CompileError> {
    if expected.accepts(line.params.len()) {
        Ok(())
    } else {
        Err(CompileError::ParamCount {
            line: line.number(),
            instruction: line.name.clone(),
            expected,
            got: line.params.len(),
            span: line.span.into(),
        })
    }
}

fn misplaced(line: &InstructionLine, reason: Misplaced) -> CompileError {
    CompileError::ScopeViolation {
        line: line.number(),
        instruction: line.name.clone(),
        reason,
        span: line.span.into(),
    }
}

/// Group `print` tokens into arguments separated by `&`
pub fn print_args(tokens: &[String]) -> Vec<String> {
    tokens
        .split(|token| token == PRINT_SEPARATOR)
        .filter(|group| !group.is_empty())
        .map(|group| group.join(" "))
        .collect()
}

/// Translate `ET`, `OU`, `NON` tokens, keeping parentheses glued to them
pub fn rewrite_connectives(tokens: &[String], connectives: &[&str; 3]) -> String {
    tokens
        .iter()
        .map(|token| {
            let open = token.len() - token.trim_start_matches('(').len();
            let rest = &token[open..];
            let close = rest.len() - rest.trim_end_matches(')').len();
            let core = &rest[..rest.len() - close];

            let translated = crate::codegen::DSL_CONNECTIVES
                .iter()
                .position(|connective| *connective == core)
                .map(|index| connectives[index]);
            match translated {
                Some(target) => format!("{}{}{}", &token[..open], target, &rest[rest.len() - close..]),
                None => token.clone(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_print_args_groups() {
        assert_eq!(
            print_args(&words("\"Hello\" & name & (ENDL)")),
            ["\"Hello\"", "name", "(ENDL)"]
        );
        assert_eq!(print_args(&words("a + 1 & b")), ["a + 1", "b"]);
        assert!(print_args(&[]).is_empty());
    }

    #[test]
    fn test_rewrite_connectives() {
        let python = ["and", "or", "not"];
        assert_eq!(
            rewrite_connectives(&words("(a > 1 ET NON b) OU c"), &python),
            "(a > 1 and not b) or c"
        );
        assert_eq!(
            rewrite_connectives(&words("RETOUR == ETAT"), &python),
            "RETOUR == ETAT"
        );
        assert_eq!(
            rewrite_connectives(&words("(NON a)"), &["&&", "||", "!"]),
            "(! a)"
        );
    }
}
