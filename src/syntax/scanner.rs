//! Incremental Python line scanner
//!
//! The scanner splits one line of text into classified tokens. It knows
//! nothing about the surrounding document: the only input besides the
//! text is the [`ScannerState`] the previous line ended in, and the only
//! output besides the tokens is the state this line ends in.
//!
//! ```text
//!  def __init__(self):        # Default
//!      self.__doc__ = """     # -> InMultilineDoubleQuoteString
//!          banana             # InMultilineDoubleQuoteString
//!      """                    # -> Default
//! ```

use super::keywords::classify_word;
use super::state::ScannerState;
use super::tokens::{Category, Token};

/// Keywords the line classifier looks ahead from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKeyword {
    ImportOrFrom,
    Class,
    Def,
    Other,
}

/// Sub-states of the decimal/float number reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberPart {
    Integer,
    Fraction,
    Exponent,
}

/// Tokenizer for a single line
///
/// Construct one per line, drain it with [`Scanner::read`] (or as an
/// iterator), then read the carried state with [`Scanner::state`].
#[derive(Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    position: usize,
    anchor: usize,
    state: ScannerState,
}

impl<'a> Scanner<'a> {
    /// Create a scanner for `text` starting in `state`
    pub fn new(text: &'a str, state: ScannerState) -> Self {
        Self {
            text,
            position: 0,
            anchor: 0,
            state,
        }
    }

    /// Scan a whole line, returning its tokens and final state
    pub fn scan_line(text: &'a str, state: ScannerState) -> (Vec<Token>, ScannerState) {
        let mut scanner = Scanner::new(text, state);
        let tokens = scanner.by_ref().collect();
        (tokens, scanner.state())
    }

    /// Current carried state
    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// Text of a token produced by this scanner
    pub fn value(&self, token: &Token) -> &'a str {
        token.text(self.text)
    }

    /// Which lookahead keyword, if any, a token spells
    pub fn keyword_kind(&self, token: &Token) -> SpecialKeyword {
        match self.value(token) {
            "import" | "from" => SpecialKeyword::ImportOrFrom,
            "class" => SpecialKeyword::Class,
            "def" => SpecialKeyword::Def,
            _ => SpecialKeyword::Other,
        }
    }

    /// Read the next token, or the end-of-line sentinel.
    ///
    /// Every call that does not return the sentinel consumes at least one
    /// character.
    pub fn read(&mut self) -> Token {
        self.anchor = self.position;
        if self.is_end() {
            return Token::end_of_line(self.position);
        }

        match self.state {
            ScannerState::InSingleQuoteString => self.read_string_literal('\''),
            ScannerState::InDoubleQuoteString => self.read_string_literal('"'),
            ScannerState::InMultilineSingleQuoteString => self.read_multiline_string_literal('\''),
            ScannerState::InMultilineDoubleQuoteString => self.read_multiline_string_literal('"'),
            ScannerState::Default => self.on_default_state(),
        }
    }

    fn on_default_state(&mut self) -> Token {
        let Some(first) = self.peek() else {
            return Token::end_of_line(self.position);
        };
        self.bump();

        match first {
            '\\' if is_line_end(self.peek()) => {
                // Line continuation; swallow the terminator if the host left it in
                self.bump();
                self.token(Category::Whitespace)
            }
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                self.read_float_number(NumberPart::Fraction)
            }
            '\'' | '"' => self.open_string_literal(first),
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            '#' => self.read_comment(),
            c if c.is_whitespace() => self.read_whitespace(),
            c => self.read_other(c),
        }
    }

    /// Opening quote already consumed; decide between `'...'` and `'''...'''`
    fn open_string_literal(&mut self, quote: char) -> Token {
        if self.peek() == Some(quote) && self.peek_nth(1) == Some(quote) {
            self.bump();
            self.bump();
            self.state = ScannerState::multiline(quote);
            return self.read_multiline_string_literal(quote);
        }
        self.read_string_literal(quote)
    }

    /// Consume a backslash escape, marking the string as continued when the
    /// backslash is the last thing on the line.
    fn check_escape_sequence(&mut self, quote: char) {
        if self.peek() == Some('\\') {
            self.bump();
            if is_line_end(self.peek()) {
                self.state = ScannerState::string(quote);
            }
        }
    }

    fn read_string_literal(&mut self, quote: char) -> Token {
        let mut ch = self.peek();
        while ch.is_some() && ch != Some(quote) {
            self.check_escape_sequence(quote);
            self.bump();
            ch = self.peek();
        }
        if ch == Some(quote) {
            self.clear_state();
        }
        self.bump();
        self.token(Category::String)
    }

    fn read_multiline_string_literal(&mut self, quote: char) -> Token {
        while let Some(ch) = self.peek() {
            if ch == quote && self.peek_nth(1) == Some(quote) && self.peek_nth(2) == Some(quote) {
                self.clear_state();
                self.bump();
                self.bump();
                self.bump();
                break;
            }
            self.bump();
        }
        self.token(Category::String)
    }

    fn read_identifier(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let word = &self.text[self.anchor..self.position];
        self.token(classify_word(word))
    }

    /// First digit already consumed
    fn read_number(&mut self) -> Token {
        let radix_digit: fn(char) -> bool = match self.peek().map(|c| c.to_ascii_lowercase()) {
            Some('b') => is_binary_digit,
            Some('o') => is_octal_digit,
            Some('x') => |c: char| c.is_ascii_hexdigit(),
            _ => return self.read_float_number(NumberPart::Integer),
        };

        self.bump();
        while self.peek().is_some_and(radix_digit) {
            self.bump();
        }
        if self.peek().is_some_and(is_integer_suffix) {
            self.bump();
        }
        self.token(Category::Number)
    }

    fn read_float_number(&mut self, mut part: NumberPart) -> Token {
        while let Some(ch) = self.peek() {
            match part {
                NumberPart::Integer if ch == '.' => part = NumberPart::Fraction,
                NumberPart::Integer | NumberPart::Fraction if self.is_exponent_start(ch) => {
                    // Consume the marker here; the sign or digit goes below
                    self.bump();
                    part = NumberPart::Exponent;
                }
                _ if !ch.is_ascii_digit() => break,
                _ => {}
            }
            self.bump();
        }

        match self.peek() {
            Some(c) if part == NumberPart::Integer && is_integer_suffix(c) => self.bump(),
            Some('j' | 'J') => self.bump(),
            _ => {}
        }
        self.token(Category::Number)
    }

    /// `e`/`E` followed by a digit, or by a sign and then a digit
    fn is_exponent_start(&self, ch: char) -> bool {
        if ch != 'e' && ch != 'E' {
            return false;
        }
        match self.peek_nth(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// `#` already consumed
    fn read_comment(&mut self) -> Token {
        let category = if self.peek() == Some('#') {
            Category::DocComment
        } else {
            Category::Comment
        };
        while !is_line_end(self.peek()) {
            self.bump();
        }
        self.token(category)
    }

    fn read_whitespace(&mut self) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.token(Category::Whitespace)
    }

    /// `first` already consumed
    fn read_other(&mut self, first: char) -> Token {
        if is_operator_char(first) {
            while self.peek().is_some_and(is_operator_char) {
                self.bump();
            }
            return self.token(Category::Operator);
        }
        if is_brace_char(first) {
            return self.token(Category::Brace);
        }
        self.token(Category::Unknown)
    }

    fn clear_state(&mut self) {
        self.state = ScannerState::Default;
    }

    fn token(&self, category: Category) -> Token {
        Token::new(category, self.anchor, self.position - self.anchor)
    }

    fn is_end(&self) -> bool {
        self.position >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.position..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.text[self.position..].chars().nth(n)
    }

    /// Advance one character; a no-op at the end of the line
    fn bump(&mut self) {
        if let Some(ch) = self.peek() {
            self.position += ch.len_utf8();
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.read();
        (!token.is_end_of_line()).then_some(token)
    }
}

fn is_line_end(ch: Option<char>) -> bool {
    matches!(ch, None | Some('\n'))
}

fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

fn is_octal_digit(ch: char) -> bool {
    ('0'..='7').contains(&ch)
}

fn is_integer_suffix(ch: char) -> bool {
    ch == 'l' || ch == 'L'
}

fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '=' | '!' | '<' | '>' | '+' | '-' | '*' | '/' | '%' | '^' | '|' | '&' | '~' | '.' | ','
            | ':' | ';'
    )
}

fn is_brace_char(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']' | '{' | '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<(Category, &str)> {
        scan_from(text, ScannerState::Default).0
    }

    fn scan_from(text: &str, state: ScannerState) -> (Vec<(Category, &str)>, ScannerState) {
        let (tokens, end) = Scanner::scan_line(text, state);
        let pairs = tokens.iter().map(|t| (t.category, t.text(text))).collect();
        (pairs, end)
    }

    #[test]
    fn test_empty_line() {
        let mut scanner = Scanner::new("", ScannerState::Default);
        assert!(scanner.read().is_end_of_line());
        assert!(scanner.read().is_end_of_line());
        assert_eq!(scanner.state(), ScannerState::Default);
    }

    #[test]
    fn test_simple_assignment() {
        assert_eq!(
            scan("x = 42"),
            vec![
                (Category::Identifier, "x"),
                (Category::Whitespace, " "),
                (Category::Operator, "="),
                (Category::Whitespace, " "),
                (Category::Number, "42"),
            ]
        );
    }

    #[test]
    fn test_identifier_precedence() {
        assert_eq!(scan("self")[0].0, Category::SelfReference);
        assert_eq!(scan("True")[0].0, Category::BuiltinType);
        assert_eq!(scan("__init__")[0].0, Category::MagicName);
        assert_eq!(scan("while")[0].0, Category::Keyword);
        assert_eq!(scan("_private9")[0], (Category::Identifier, "_private9"));
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(scan("naïve"), vec![(Category::Identifier, "naïve")]);
    }

    #[test]
    fn test_numeric_forms() {
        let literals = ["0x1A", "0b101", "0o17", "3.14e-2", "5j", "10L", "1e5", "2.5E+3j", "0XffL"];
        for literal in literals {
            assert_eq!(scan(literal), vec![(Category::Number, literal)], "literal {literal}");
        }
    }

    #[test]
    fn test_leading_dot_number() {
        assert_eq!(scan(".5"), vec![(Category::Number, ".5")]);
        assert_eq!(scan(".5e3j"), vec![(Category::Number, ".5e3j")]);
    }

    #[test]
    fn test_number_suffix_rules() {
        // `L` is only an integer suffix
        assert_eq!(
            scan("1.5L"),
            vec![(Category::Number, "1.5"), (Category::Identifier, "L")]
        );
        // `e` without a following digit ends the number
        assert_eq!(
            scan("1.5ex"),
            vec![(Category::Number, "1.5"), (Category::Identifier, "ex")]
        );
        assert_eq!(
            scan("0o78"),
            vec![(Category::Number, "0o7"), (Category::Number, "8")]
        );
    }

    #[test]
    fn test_attribute_access_is_operator() {
        assert_eq!(
            scan("a.b"),
            vec![
                (Category::Identifier, "a"),
                (Category::Operator, "."),
                (Category::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn test_single_line_strings() {
        assert_eq!(
            scan(r#"'a' "b""#),
            vec![
                (Category::String, "'a'"),
                (Category::Whitespace, " "),
                (Category::String, "\"b\""),
            ]
        );
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let (tokens, end) = scan_from(r"'it\'s' + x", ScannerState::Default);
        assert_eq!(tokens[0], (Category::String, r"'it\'s'"));
        assert_eq!(tokens[2], (Category::Operator, "+"));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_unterminated_string_stays_default() {
        let (tokens, end) = scan_from("s = 'abc", ScannerState::Default);
        assert_eq!(tokens.last(), Some(&(Category::String, "'abc")));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_string_continuation_escape() {
        let (tokens, end) = scan_from(r"s = 'abc\", ScannerState::Default);
        assert_eq!(tokens.last(), Some(&(Category::String, r"'abc\")));
        assert_eq!(end, ScannerState::InSingleQuoteString);

        let (tokens, end) = scan_from("def' + x", end);
        assert_eq!(tokens[0], (Category::String, "def'"));
        assert_eq!(tokens[2], (Category::Operator, "+"));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_double_quote_continuation() {
        let (_, end) = scan_from("s = \"abc\\", ScannerState::Default);
        assert_eq!(end, ScannerState::InDoubleQuoteString);
    }

    #[test]
    fn test_multiline_string_open_and_close() {
        let (tokens, end) = scan_from("x = \"\"\"", ScannerState::Default);
        assert_eq!(tokens.last(), Some(&(Category::String, "\"\"\"")));
        assert_eq!(end, ScannerState::InMultilineDoubleQuoteString);

        let (tokens, end) = scan_from("hello", end);
        assert_eq!(tokens, vec![(Category::String, "hello")]);
        assert_eq!(end, ScannerState::InMultilineDoubleQuoteString);

        let (tokens, end) = scan_from("\"\"\" + y", end);
        assert_eq!(tokens[0], (Category::String, "\"\"\""));
        assert_eq!(tokens[4], (Category::Identifier, "y"));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_multiline_on_one_line() {
        let (tokens, end) = scan_from("'''doc''' x", ScannerState::Default);
        assert_eq!(tokens[0], (Category::String, "'''doc'''"));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_empty_triple_quoted_string() {
        let (tokens, end) = scan_from("'''''' + x", ScannerState::Default);
        assert_eq!(tokens[0], (Category::String, "''''''"));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_multiline_ignores_other_quote() {
        let (tokens, end) = scan_from("a \"\"\" b", ScannerState::InMultilineSingleQuoteString);
        assert_eq!(tokens, vec![(Category::String, "a \"\"\" b")]);
        assert_eq!(end, ScannerState::InMultilineSingleQuoteString);
    }

    #[test]
    fn test_empty_string_is_not_multiline() {
        let (tokens, end) = scan_from("'' + x", ScannerState::Default);
        assert_eq!(tokens[0], (Category::String, "''"));
        assert_eq!(end, ScannerState::Default);
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            scan("x # note"),
            vec![
                (Category::Identifier, "x"),
                (Category::Whitespace, " "),
                (Category::Comment, "# note"),
            ]
        );
        assert_eq!(scan("## doc 'quoted'"), vec![(Category::DocComment, "## doc 'quoted'")]);
    }

    #[test]
    fn test_line_continuation() {
        assert_eq!(
            scan("x = 1 + \\"),
            vec![
                (Category::Identifier, "x"),
                (Category::Whitespace, " "),
                (Category::Operator, "="),
                (Category::Whitespace, " "),
                (Category::Number, "1"),
                (Category::Whitespace, " "),
                (Category::Operator, "+"),
                (Category::Whitespace, " "),
                (Category::Whitespace, "\\"),
            ]
        );
        assert_eq!(scan("\\\n"), vec![(Category::Whitespace, "\\\n")]);
    }

    #[test]
    fn test_stray_backslash_is_unknown() {
        assert_eq!(
            scan("\\x"),
            vec![(Category::Unknown, "\\"), (Category::Identifier, "x")]
        );
    }

    #[test]
    fn test_operators_and_braces() {
        assert_eq!(
            scan("f(a)**=[]"),
            vec![
                (Category::Identifier, "f"),
                (Category::Brace, "("),
                (Category::Identifier, "a"),
                (Category::Brace, ")"),
                (Category::Operator, "**="),
                (Category::Brace, "["),
                (Category::Brace, "]"),
            ]
        );
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(
            scan("@$€"),
            vec![
                (Category::Unknown, "@"),
                (Category::Unknown, "$"),
                (Category::Unknown, "€"),
            ]
        );
    }

    #[test]
    fn test_keyword_kind() {
        let text = "from x import y";
        let mut scanner = Scanner::new(text, ScannerState::Default);
        let first = scanner.read();
        assert_eq!(scanner.keyword_kind(&first), SpecialKeyword::ImportOrFrom);
        assert_eq!(scanner.value(&first), "from");
        let second = scanner.read();
        assert_eq!(scanner.keyword_kind(&second), SpecialKeyword::Other);
    }

    #[test]
    fn test_tokens_cover_line() {
        let text = "    r = f'{x}' if a>=0x1F else [\"\"\"s\"\"\", .5j] # done";
        let (tokens, _) = Scanner::scan_line(text, ScannerState::Default);
        let mut pos = 0;
        for token in &tokens {
            assert_eq!(token.start, pos);
            assert!(token.len > 0);
            pos = token.end();
        }
        assert_eq!(pos, text.len());
    }
}
