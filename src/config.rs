//! Compiler configuration
//!
//! [`CompileOptions`] is what the library needs. [`Config`] is the
//! on-disk form read by the CLI from `algoline.toml`.

use crate::codegen::Target;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "algoline.toml";

/// Options for one compiler instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// One indentation level
    pub indent: String,
    /// Reject unknown lines; `None` keeps the backend default
    pub strict: Option<bool>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            strict: None,
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {message}")]
    #[diagnostic(code(config::io))]
    Io { path: PathBuf, message: String },

    #[error("invalid config file {path}: {message}")]
    #[diagnostic(
        code(config::parse),
        help("expected keys: target, indent_width, use_tabs, strict")
    )]
    Parse { path: PathBuf, message: String },
}

/// Settings read from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: Target,
    /// Spaces per indentation level
    pub indent_width: usize,
    /// Indent with one tab per level instead of spaces
    pub use_tabs: bool,
    pub strict: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: Target::default(),
            indent_width: 4,
            use_tabs: false,
            strict: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load `path`, or [`CONFIG_FILE`] if it exists, or the defaults
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.is_file() {
                    tracing::debug!("Using {}", CONFIG_FILE);
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    pub fn indent(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width)
        }
    }

    pub fn options(&self) -> CompileOptions {
        CompileOptions {
            indent: self.indent(),
            strict: self.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            target = "cpp"
            indent_width = 2
            strict = false
            "#,
        )
        .unwrap();
        assert_eq!(config.target, Target::Cpp);
        assert_eq!(config.indent(), "  ");
        assert_eq!(config.options().strict, Some(false));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.options(), CompileOptions::default());
    }

    #[test]
    fn test_tabs() {
        let config = Config::parse("use_tabs = true").unwrap();
        assert_eq!(config.indent(), "\t");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::parse("colour = \"red\"").is_err());
    }
}
