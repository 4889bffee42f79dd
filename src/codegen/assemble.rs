//! Final assembly: partition the compiled lines and indentation helpers

use crate::analyze::{CompiledLine, Section};

/// Library features the output program needs imports for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub sqrt: bool,
    pub pow: bool,
    pub random: bool,
    pub structures: bool,
    pub window: bool,
}

impl Usage {
    /// Math functions mentioned anywhere in the source
    pub fn scan(source: &str) -> Self {
        Self {
            sqrt: source.contains("racine("),
            pow: source.contains("puissance("),
            random: source.contains("aleatoire("),
            ..Self::default()
        }
    }

    pub fn merged(self, other: Usage) -> Self {
        Self {
            sqrt: self.sqrt || other.sqrt,
            pow: self.pow || other.pow,
            random: self.random || other.random,
            structures: self.structures || other.structures,
            window: self.window || other.window,
        }
    }

    pub fn math(&self) -> bool {
        self.sqrt || self.pow
    }
}

/// Compiled lines split by output section. Empty lines are gone;
/// order within each section is the source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program<'a> {
    /// Structure definitions, one entry each
    pub declarations: Vec<&'a str>,
    /// One entry per function or procedure
    pub functions: Vec<Vec<&'a str>>,
    /// Top-level statements
    pub main: Vec<&'a str>,
    pub usage: Usage,
}

impl<'a> Program<'a> {
    pub fn from_lines(lines: &'a [CompiledLine], usage: Usage) -> Self {
        let mut program = Program {
            usage,
            ..Program::default()
        };
        let mut current: Vec<&'a str> = Vec::new();

        for line in lines {
            let text = line.text.as_str();
            match line.section {
                Section::Declarations if !text.is_empty() => program.declarations.push(text),
                Section::Functions if !text.is_empty() => current.push(text),
                Section::Main if !text.is_empty() => program.main.push(text),
                _ => {}
            }
            if line.closes_function && !current.is_empty() {
                program.functions.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            program.functions.push(current);
        }

        program
    }

    /// Number of non-empty lines across all sections
    pub fn line_count(&self) -> usize {
        self.declarations.len()
            + self.functions.iter().map(Vec::len).sum::<usize>()
            + self.main.len()
    }
}

/// Indent every line of a rewrite by `depth` units; leading tabs on a
/// line add one unit each.
pub fn indent_fragment(text: &str, depth: usize, unit: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.split('\n')
        .map(|line| {
            let relative = line.len() - line.trim_start_matches('\t').len();
            format!("{}{}", unit.repeat(depth + relative), &line[relative..])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every line of an already indented block with one more unit
pub fn indent_block(text: &str, unit: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", unit, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Span;

    fn line(text: &str, section: Section, closes_function: bool) -> CompiledLine {
        CompiledLine {
            text: text.to_string(),
            section,
            closes_function,
            span: Span::default(),
        }
    }

    #[test]
    fn test_indent_fragment_relative_tabs() {
        let text = "try:\n\tx = eval(x)\nexcept Exception:\n\tpass";
        assert_eq!(
            indent_fragment(text, 1, "  "),
            "  try:\n    x = eval(x)\n  except Exception:\n    pass"
        );
        assert_eq!(indent_fragment("", 3, "  "), "");
    }

    #[test]
    fn test_indent_block() {
        assert_eq!(indent_block("a\n  b", "\t"), "\ta\n\t  b");
    }

    #[test]
    fn test_partition_groups_functions() {
        let lines = vec![
            line("def f() -> None:", Section::Functions, false),
            line("    pass", Section::Functions, false),
            line("", Section::Functions, true),
            line("", Section::Main, false),
            line("x = 1", Section::Main, false),
            line("def g() -> None:", Section::Functions, false),
            line("", Section::Functions, true),
            line("class A: pass", Section::Declarations, false),
        ];
        let program = Program::from_lines(&lines, Usage::default());

        assert_eq!(program.functions.len(), 2);
        assert_eq!(program.functions[0], ["def f() -> None:", "    pass"]);
        assert_eq!(program.main, ["x = 1"]);
        assert_eq!(program.declarations, ["class A: pass"]);
        assert_eq!(program.line_count(), 5);
    }

    #[test]
    fn test_usage_scan() {
        let usage = Usage::scan("x = racine(4) + aleatoire()");
        assert!(usage.sqrt && usage.random && usage.math());
        assert!(!usage.pow);
    }
}
