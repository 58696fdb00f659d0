//! Line classifier
//!
//! Drives the [`Scanner`] over one line and applies the lookahead rules
//! that need more than one token to decide:
//!
//! - `import` / `from` at the start of a line turn every following
//!   identifier on that line into [`Category::ImportedModule`];
//! - `class` / `def` at the start of a line turn the next name into
//!   [`Category::ClassDeclaration`] / [`Category::FunctionDeclaration`].

use super::scanner::{Scanner, SpecialKeyword};
use super::state::ScannerState;
use super::style::Span;
use super::theme::Theme;
use super::tokens::{Category, Token};

/// When the "still at line start" flag is cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineStartRule {
    /// Cleared by the first non-whitespace token, so indented
    /// declarations and imports are still recognised
    #[default]
    FirstSignificantToken,
    /// Cleared by the first whitespace token; lookahead only fires for a
    /// keyword that precedes any whitespace on the line
    LegacyWhitespace,
}

/// Options for the line classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    pub line_start_rule: LineStartRule,
}

/// Classified tokens of one line plus the state to carry into the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
    /// Tokens with their effective (post-lookahead) categories
    pub tokens: Vec<Token>,
    /// State at end of line (for next line)
    pub end_state: ScannerState,
}

impl LineTokens {
    /// Map every token to a styled span
    pub fn styled(&self, theme: &Theme) -> Vec<Span> {
        self.tokens
            .iter()
            .map(|t| Span::new(t.start, t.end(), theme.style(t.category)))
            .collect()
    }
}

/// Result of highlighting a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Spans of styled text in this line
    pub spans: Vec<Span>,
    /// State at end of line (for next line)
    pub end_state: ScannerState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Scanning,
    ConsumingImportTail,
}

struct LineClassifier<'a> {
    scanner: Scanner<'a>,
    options: HighlightOptions,
    mode: Mode,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> LineClassifier<'a> {
    fn new(text: &'a str, initial_state: ScannerState, options: HighlightOptions) -> Self {
        Self {
            scanner: Scanner::new(text, initial_state),
            options,
            mode: Mode::Scanning,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> LineTokens {
        loop {
            let token = self.scanner.read();
            if token.is_end_of_line() {
                break;
            }
            match self.mode {
                Mode::Scanning => self.on_token(token),
                Mode::ConsumingImportTail => self.push_import_token(token),
            }
        }

        LineTokens {
            tokens: self.tokens,
            end_state: self.scanner.state(),
        }
    }

    fn on_token(&mut self, token: Token) {
        self.tokens.push(token);

        if token.category == Category::Keyword && self.at_line_start {
            match self.scanner.keyword_kind(&token) {
                SpecialKeyword::ImportOrFrom => self.mode = Mode::ConsumingImportTail,
                SpecialKeyword::Class => self.highlight_declaration(Category::ClassDeclaration),
                SpecialKeyword::Def => self.highlight_declaration(Category::FunctionDeclaration),
                SpecialKeyword::Other => {}
            }
        }

        let is_whitespace = token.category == Category::Whitespace;
        match self.options.line_start_rule {
            LineStartRule::FirstSignificantToken if !is_whitespace => self.at_line_start = false,
            LineStartRule::LegacyWhitespace if is_whitespace => self.at_line_start = false,
            _ => {}
        }
    }

    fn push_import_token(&mut self, token: Token) {
        let token = if token.category == Category::Identifier {
            token.with_category(Category::ImportedModule)
        } else {
            token
        };
        self.tokens.push(token);
    }

    /// Skip whitespace after `class`/`def`, then rename the next token if
    /// it is a name (a plain identifier or a dunder like `__init__`)
    fn highlight_declaration(&mut self, declaration: Category) {
        loop {
            let token = self.scanner.read();
            if token.is_end_of_line() {
                return;
            }
            match token.category {
                Category::Whitespace => self.tokens.push(token),
                Category::Identifier | Category::MagicName => {
                    self.tokens.push(token.with_category(declaration));
                    return;
                }
                _ => {
                    self.tokens.push(token);
                    return;
                }
            }
        }
    }
}

/// Classify one line, returning tokens with effective categories and the
/// state to carry into the next line
pub fn classify_line(
    text: &str,
    initial_state: ScannerState,
    options: &HighlightOptions,
) -> LineTokens {
    LineClassifier::new(text, initial_state, *options).run()
}

/// Styles lines of Python with a borrowed theme
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'t> {
    theme: &'t Theme,
    options: HighlightOptions,
}

impl<'t> Highlighter<'t> {
    pub fn new(theme: &'t Theme) -> Self {
        Self::with_options(theme, HighlightOptions::default())
    }

    pub fn with_options(theme: &'t Theme, options: HighlightOptions) -> Self {
        Self { theme, options }
    }

    pub fn theme(&self) -> &'t Theme {
        self.theme
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Classify a line without styling it
    pub fn classify_line(&self, text: &str, prev_state: ScannerState) -> LineTokens {
        classify_line(text, prev_state, &self.options)
    }

    /// Highlight a single line of text
    ///
    /// Takes the line text and the state from the previous line.
    /// Returns spans and the state for the next line.
    pub fn highlight_line(&self, text: &str, prev_state: ScannerState) -> HighlightResult {
        let line = self.classify_line(text, prev_state);
        HighlightResult {
            spans: line.styled(self.theme),
            end_state: line.end_state,
        }
    }
}
