//! Syntax and styling module
//!
//! This module provides the Python highlighting core:
//! - a per-line scanner with carried string state
//! - the line classifier with import/declaration lookahead
//! - styles, themes and a per-document highlight cache

mod cache;
mod highlighter;
mod keywords;
mod scanner;
mod state;
mod style;
mod theme;
mod tokens;

pub use cache::{CachedLine, HighlightCache};
pub use highlighter::{
    classify_line, HighlightOptions, HighlightResult, Highlighter, LineStartRule, LineTokens,
};
pub use keywords::{classify_word, BUILTINS, KEYWORDS, MAGIC_NAMES};
pub use scanner::{Scanner, SpecialKeyword};
pub use state::ScannerState;
pub use style::{Color, Emphasis, Span, Style};
pub use theme::Theme;
pub use tokens::{Category, Token};
