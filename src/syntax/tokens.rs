//! Lexical categories and tokens
//!
//! This module defines the categories a line can be split into and the
//! token value produced by the scanner, plus the default visual style
//! of every category.

use std::ops::Range;

use super::style::{Emphasis, Style};
use crate::error::HighlightError;

/// Lexical categories for highlighting
///
/// `ImportedModule`, `ClassDeclaration` and `FunctionDeclaration` are only
/// ever assigned by the line classifier, never by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Numeric literals (`42`, `0x1f`, `3.5e2`, `1j`)
    Number,
    /// String literals, single or triple quoted
    String,
    /// Reserved keywords
    Keyword,
    /// Builtin functions and constants (`len`, `None`)
    BuiltinType,
    /// The `self` reference
    SelfReference,
    /// Dunder methods and attributes (`__init__`, `__doc__`)
    MagicName,
    /// Operator and punctuation runs
    Operator,
    /// Brackets, parentheses and braces
    Brace,
    /// `#` comments
    Comment,
    /// `##` documentation comments
    DocComment,
    /// Plain identifiers
    Identifier,
    /// Whitespace runs and line continuations
    Whitespace,
    /// Identifiers on an import line
    ImportedModule,
    /// Anything the scanner does not recognise
    Unknown,
    /// Name following `class`
    ClassDeclaration,
    /// Name following `def`
    FunctionDeclaration,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 16;

    /// Every category, in index order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Number,
        Category::String,
        Category::Keyword,
        Category::BuiltinType,
        Category::SelfReference,
        Category::MagicName,
        Category::Operator,
        Category::Brace,
        Category::Comment,
        Category::DocComment,
        Category::Identifier,
        Category::Whitespace,
        Category::ImportedModule,
        Category::Unknown,
        Category::ClassDeclaration,
        Category::FunctionDeclaration,
    ];

    /// Stable index of this category (declaration order)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Number => Style::rgb(165, 42, 42),
            Category::String => Style::rgb(255, 0, 255),
            Category::Keyword => Style::rgb(0, 0, 255),
            Category::BuiltinType => Style::rgb(138, 43, 226).with_emphasis(Emphasis::Bold),
            Category::SelfReference => Style::default().with_emphasis(Emphasis::Italic),
            Category::MagicName => Style::default().with_emphasis(Emphasis::BoldItalic),
            Category::Operator => Style::rgb(139, 69, 19),
            Category::Brace => Style::rgb(244, 164, 96),
            Category::Comment => Style::rgb(0, 128, 0),
            Category::DocComment => Style::rgb(0, 100, 0).with_emphasis(Emphasis::Bold),
            Category::Identifier => Style::rgb(119, 136, 153),
            Category::Whitespace => Style::rgb(128, 128, 128),
            Category::ImportedModule => Style::rgb(139, 0, 139).with_emphasis(Emphasis::Italic),
            Category::Unknown => Style::rgb(255, 0, 0).with_emphasis(Emphasis::BoldItalic),
            Category::ClassDeclaration => {
                Style::rgb(107, 142, 35).with_emphasis(Emphasis::BoldItalic)
            }
            Category::FunctionDeclaration => {
                Style::rgb(128, 128, 0).with_emphasis(Emphasis::BoldItalic)
            }
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Number => "Number",
            Category::String => "String",
            Category::Keyword => "Keyword",
            Category::BuiltinType => "BuiltinType",
            Category::SelfReference => "SelfReference",
            Category::MagicName => "MagicName",
            Category::Operator => "Operator",
            Category::Brace => "Brace",
            Category::Comment => "Comment",
            Category::DocComment => "DocComment",
            Category::Identifier => "Identifier",
            Category::Whitespace => "Whitespace",
            Category::ImportedModule => "ImportedModule",
            Category::Unknown => "Unknown",
            Category::ClassDeclaration => "ClassDeclaration",
            Category::FunctionDeclaration => "FunctionDeclaration",
        }
    }

    /// Parse a category from its name (for theme loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl TryFrom<u8> for Category {
    type Error = HighlightError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Category::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(HighlightError::CategoryOutOfRange(index))
    }
}

/// One classified span of a line
///
/// Offsets are byte offsets into the line the token was read from. A
/// zero-length token is the end-of-line sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub category: Category,
    pub start: usize,
    pub len: usize,
}

impl Token {
    pub fn new(category: Category, start: usize, len: usize) -> Self {
        Self {
            category,
            start,
            len,
        }
    }

    /// The sentinel returned once the scanner reaches the end of the line
    pub fn end_of_line(pos: usize) -> Self {
        Self::new(Category::Unknown, pos, 0)
    }

    pub fn is_end_of_line(&self) -> bool {
        self.len == 0
    }

    /// Byte offset one past the last byte of this token
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Slice this token's text out of the line it came from
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.range()).unwrap_or("")
    }

    /// Same span, different category
    pub fn with_category(self, category: Category) -> Self {
        Self { category, ..self }
    }
}
