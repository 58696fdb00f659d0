//! pyhl - incremental Python syntax highlighting
//!
//! Lines are scanned one at a time; the only thing carried from one line
//! to the next is a [`syntax::ScannerState`].
//!
//! ```
//! use pyhl::syntax::{Category, Highlighter, ScannerState, Theme};
//!
//! let theme = Theme::default();
//! let highlighter = Highlighter::new(&theme);
//! let line = highlighter.classify_line("def spam(eggs):", ScannerState::Default);
//! assert_eq!(line.tokens[2].category, Category::FunctionDeclaration);
//! assert_eq!(line.end_state, ScannerState::Default);
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;
