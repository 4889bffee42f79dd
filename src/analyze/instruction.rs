//! Instruction kinds and their keyword table

use std::fmt;

/// Accepted parameter counts for an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamRange {
    pub min: usize,
    pub max: Option<usize>,
}

impl ParamRange {
    pub const fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub const fn any() -> Self {
        Self::at_least(0)
    }

    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }
}

impl fmt::Display for ParamRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{}/{}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// Documentation headers of a function (`precond`, `data`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Precondition,
    Data,
    DataResult,
    Result,
    Description,
    LocalVariables,
    Constants,
}

impl DocKind {
    /// Heading written before the documented text
    pub fn label(&self) -> &'static str {
        match self {
            DocKind::Precondition => "Préconditions",
            DocKind::Data => "Données",
            DocKind::DataResult => "Données/Résultats",
            DocKind::Result => "Résultats",
            DocKind::Description => "Description",
            DocKind::LocalVariables => "Variables locales",
            DocKind::Constants => "Constantes",
        }
    }
}

/// Window and drawing calls of the Grapic library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicsOp {
    WinInit,
    WinClear,
    WinDisplay,
    WinQuit,
    Color,
    BackgroundColor,
    PressSpace,
    Circle,
    CircleFill,
    Line,
    Rectangle,
    RectangleFill,
    PutPixel,
    Delay,
    Image,
}

impl GraphicsOp {
    pub fn params(&self) -> ParamRange {
        match self {
            GraphicsOp::WinInit => ParamRange::exactly(3),
            GraphicsOp::WinClear
            | GraphicsOp::WinDisplay
            | GraphicsOp::WinQuit
            | GraphicsOp::PressSpace => ParamRange::any(),
            GraphicsOp::Color
            | GraphicsOp::BackgroundColor
            | GraphicsOp::Circle
            | GraphicsOp::CircleFill => ParamRange::exactly(3),
            GraphicsOp::Line | GraphicsOp::Rectangle | GraphicsOp::RectangleFill => {
                ParamRange::exactly(4)
            }
            GraphicsOp::PutPixel => ParamRange::between(5, 6),
            GraphicsOp::Delay => ParamRange::exactly(1),
            GraphicsOp::Image => ParamRange::at_least(1),
        }
    }

    /// Grapic function name
    pub fn function_name(&self) -> &'static str {
        match self {
            GraphicsOp::WinInit => "winInit",
            GraphicsOp::WinClear => "winClear",
            GraphicsOp::WinDisplay => "winDisplay",
            GraphicsOp::WinQuit => "winQuit",
            GraphicsOp::Color => "color",
            GraphicsOp::BackgroundColor => "backgroundColor",
            GraphicsOp::PressSpace => "pressSpace",
            GraphicsOp::Circle => "circle",
            GraphicsOp::CircleFill => "circleFill",
            GraphicsOp::Line => "line",
            GraphicsOp::Rectangle => "rectangle",
            GraphicsOp::RectangleFill => "rectangleFill",
            GraphicsOp::PutPixel => "put_pixel",
            GraphicsOp::Delay => "delay",
            GraphicsOp::Image => "image",
        }
    }
}

/// Kind of a source line, resolved once from its first token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Blank,
    Comment,
    /// `<type> <names...>`; the keyword comes from the backend's type table
    Declare,
    For,
    Foreach,
    While,
    If,
    Elif,
    Else,
    Switch,
    Case,
    Default,
    End,
    Print,
    Input,
    Function,
    FunctionStart,
    Return,
    Array,
    Struct,
    Init,
    ExitCode,
    Doc(DocKind),
    Graphics(GraphicsOp),
    /// Not an instruction: assignment, call, or unknown
    Other,
}

/// Instruction keywords
const KEYWORDS: &[(&str, Instruction)] = &[
    ("for", Instruction::For),
    ("foreach", Instruction::Foreach),
    ("while", Instruction::While),
    ("if", Instruction::If),
    ("elif", Instruction::Elif),
    ("else", Instruction::Else),
    ("switch", Instruction::Switch),
    ("case", Instruction::Case),
    ("default", Instruction::Default),
    ("end", Instruction::End),
    ("print", Instruction::Print),
    ("input", Instruction::Input),
    ("fx", Instruction::Function),
    ("fx_start", Instruction::FunctionStart),
    ("return", Instruction::Return),
    ("arr", Instruction::Array),
    ("struct", Instruction::Struct),
    ("init", Instruction::Init),
    ("CODE_RETOUR", Instruction::ExitCode),
    ("precond", Instruction::Doc(DocKind::Precondition)),
    ("data", Instruction::Doc(DocKind::Data)),
    ("datar", Instruction::Doc(DocKind::DataResult)),
    ("result", Instruction::Doc(DocKind::Result)),
    ("desc", Instruction::Doc(DocKind::Description)),
    ("vars", Instruction::Doc(DocKind::LocalVariables)),
    ("const", Instruction::Doc(DocKind::Constants)),
    ("winit", Instruction::Graphics(GraphicsOp::WinInit)),
    ("wclear", Instruction::Graphics(GraphicsOp::WinClear)),
    ("wdisplay", Instruction::Graphics(GraphicsOp::WinDisplay)),
    ("wquit", Instruction::Graphics(GraphicsOp::WinQuit)),
    ("color", Instruction::Graphics(GraphicsOp::Color)),
    ("bcolor", Instruction::Graphics(GraphicsOp::BackgroundColor)),
    ("pspace", Instruction::Graphics(GraphicsOp::PressSpace)),
    ("circle", Instruction::Graphics(GraphicsOp::Circle)),
    ("circlef", Instruction::Graphics(GraphicsOp::CircleFill)),
    ("line", Instruction::Graphics(GraphicsOp::Line)),
    ("rect", Instruction::Graphics(GraphicsOp::Rectangle)),
    ("rectf", Instruction::Graphics(GraphicsOp::RectangleFill)),
    ("ppixel", Instruction::Graphics(GraphicsOp::PutPixel)),
    ("delay", Instruction::Graphics(GraphicsOp::Delay)),
    ("img", Instruction::Graphics(GraphicsOp::Image)),
];

impl Instruction {
    /// Look up an instruction keyword
    pub fn from_name(name: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == name)
            .map(|(_, instruction)| *instruction)
    }

    /// All instruction keywords
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        KEYWORDS.iter().map(|(keyword, _)| *keyword)
    }

    /// Lines rendered at the depth of the block they open or continue
    pub fn is_block_opener(&self) -> bool {
        matches!(
            self,
            Instruction::For
                | Instruction::Foreach
                | Instruction::While
                | Instruction::If
                | Instruction::Elif
                | Instruction::Else
                | Instruction::Switch
                | Instruction::Case
                | Instruction::Default
                | Instruction::Function
        )
    }

    /// Lines that give the enclosing block a body. Comments and
    /// documentation are not statements, `struct` and `fx` are hoisted
    /// out of the block, and branch headers and `end` are tracked by the
    /// analyzer.
    pub fn fills_block(&self) -> bool {
        !matches!(
            self,
            Instruction::Blank
                | Instruction::Comment
                | Instruction::Doc(_)
                | Instruction::FunctionStart
                | Instruction::Struct
                | Instruction::Function
                | Instruction::Elif
                | Instruction::Else
                | Instruction::End
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Instruction::from_name("for"), Some(Instruction::For));
        assert_eq!(
            Instruction::from_name("datar"),
            Some(Instruction::Doc(DocKind::DataResult))
        );
        assert_eq!(Instruction::from_name("int"), None);
        assert_eq!(Instruction::from_name("FOR"), None);
    }

    #[test]
    fn test_block_openers() {
        assert!(Instruction::Else.is_block_opener());
        assert!(Instruction::Function.is_block_opener());
        assert!(!Instruction::End.is_block_opener());
        assert!(!Instruction::Print.is_block_opener());
    }

    #[test]
    fn test_block_fillers() {
        assert!(Instruction::Print.fills_block());
        assert!(Instruction::If.fills_block());
        assert!(Instruction::Case.fills_block());
        assert!(!Instruction::Comment.fills_block());
        assert!(!Instruction::Doc(DocKind::Description).fills_block());
        assert!(!Instruction::Struct.fills_block());
        assert!(!Instruction::Function.fills_block());
        assert!(!Instruction::Else.fills_block());
    }

    #[test]
    fn test_param_range_display() {
        assert_eq!(ParamRange::exactly(3).to_string(), "3");
        assert_eq!(ParamRange::between(5, 6).to_string(), "5/6");
        assert_eq!(ParamRange::at_least(2).to_string(), "at least 2");
        assert!(ParamRange::between(3, 4).accepts(4));
        assert!(!ParamRange::between(3, 4).accepts(2));
        assert!(ParamRange::any().accepts(0));
    }

    #[test]
    fn test_keywords_are_unique() {
        let mut keywords: Vec<_> = Instruction::keywords().collect();
        let total = keywords.len();
        keywords.sort_unstable();
        keywords.dedup();
        assert_eq!(keywords.len(), total);
    }
}
