//! Algoline CLI
//!
//! Main entry point for the `alc` command.

use algoline::analyze::Instruction;
use algoline::{CompileOptions, Compiler, Config, SourceFile, Target};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "alc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiler for the algorithmic pseudocode DSL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a DSL source file
    Compile {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target language
        #[arg(short, long, value_enum)]
        target: Option<TargetArg>,

        /// Output file (stdout when absent)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit an intermediate form instead of the program
        #[arg(long, value_enum)]
        emit: Option<EmitType>,

        /// Reject lines that are not instructions
        #[arg(long, conflicts_with = "loose")]
        strict: bool,

        /// Pass unknown lines through unchanged
        #[arg(long)]
        loose: bool,

        /// Configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Check a DSL source file without writing output
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target language
        #[arg(short, long, value_enum)]
        target: Option<TargetArg>,

        /// Configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show information about the compiler
    Info,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum TargetArg {
    /// Python 3
    Python,
    /// C++ with Grapic
    Cpp,
    /// French algorithmic description
    Algo,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Python => Target::Python,
            TargetArg::Cpp => Target::Cpp,
            TargetArg::Algo => Target::Algorithmic,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum EmitType {
    /// Per-line compiled buffer (JSON)
    Lines,
}

/// Log level when `RUST_LOG` is unset
fn default_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(cli.verbose))),
        )
        .init();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Compile {
            input,
            target,
            output,
            emit,
            strict,
            loose,
            config,
        } => {
            let strict = match (strict, loose) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            compile(&input, target, output.as_deref(), emit, strict, config.as_deref())
        }

        Commands::Check {
            input,
            target,
            config,
        } => check(&input, target, config.as_deref()),

        Commands::Info => info(),
    }
}

/// Target and options from the config file, overridden by flags
fn settings(
    target: Option<TargetArg>,
    strict: Option<bool>,
    config: Option<&Path>,
) -> Result<(Target, CompileOptions)> {
    let config = Config::discover(config)?;
    let target = target.map(Target::from).unwrap_or(config.target);
    let mut options = config.options();
    if strict.is_some() {
        options.strict = strict;
    }
    Ok((target, options))
}

fn read_source(input: &Path) -> Result<SourceFile> {
    let content = std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))?;
    Ok(SourceFile::new(input.to_string_lossy().to_string(), content))
}

fn compile(
    input: &Path,
    target: Option<TargetArg>,
    output: Option<&Path>,
    emit: Option<EmitType>,
    strict: Option<bool>,
    config: Option<&Path>,
) -> Result<()> {
    let (target, options) = settings(target, strict, config)?;
    tracing::info!("Compiling {:?} to {}", input, target);

    let source = read_source(input)?;
    let mut compiler = Compiler::with_options(target, &options);
    let result = compiler.compile(&source.content);

    if let Some(EmitType::Lines) = emit {
        let json = serde_json::to_string_pretty(compiler.lines())
            .map_err(|e| miette::miette!("Failed to serialize lines: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    let text = result.map_err(|e| miette::Report::new(e).with_source_code(source.to_named_source()))?;

    match output {
        Some(path) => {
            std::fs::write(path, &text).into_diagnostic()?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn check(input: &Path, target: Option<TargetArg>, config: Option<&Path>) -> Result<()> {
    let (target, options) = settings(target, None, config)?;
    tracing::info!("Checking {:?} for {}", input, target);

    let source = read_source(input)?;
    let mut compiler = Compiler::with_options(target, &options);
    if let Err(error) = compiler.compile(&source.content) {
        let others = compiler.errors().len().saturating_sub(1);
        if others > 0 {
            tracing::info!("{} more error(s) after the first", others);
        }
        return Err(miette::Report::new(error).with_source_code(source.to_named_source()));
    }

    println!("All checks passed: {}", input.display());
    Ok(())
}

fn info() -> Result<()> {
    println!("Algoline compiler v{}", algoline::VERSION);
    println!();
    println!("Targets:");
    for target in Target::ALL {
        let backend = target.backend();
        let mode = if backend.strict_by_default() {
            "strict"
        } else {
            "loose"
        };
        let graphics = if backend.supports_graphics() {
            ", graphics"
        } else {
            ""
        };
        println!("  {} (.{}, {}{})", target, target.file_extension(), mode, graphics);
        for (keyword, ty) in backend.types().iter() {
            println!("    {:<8} -> {}", keyword, ty);
        }
    }
    println!();
    println!("Instructions:");
    println!("  {}", Instruction::keywords().collect::<Vec<_>>().join(" "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_sets_log_level() {
        let cli = Cli::try_parse_from(["alc", "info", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(default_level(cli.verbose), "info");

        let cli = Cli::try_parse_from(["alc", "info"]).unwrap();
        assert_eq!(default_level(cli.verbose), "warn");
    }
}
