//! Line scanner properties over the public API

use proptest::prelude::*;

use pyhl::syntax::{classify_line, Category, HighlightOptions, Scanner, ScannerState, Token};

const ALL_STATES: [ScannerState; 5] = [
    ScannerState::Default,
    ScannerState::InSingleQuoteString,
    ScannerState::InDoubleQuoteString,
    ScannerState::InMultilineSingleQuoteString,
    ScannerState::InMultilineDoubleQuoteString,
];

fn assert_covers(text: &str, tokens: &[Token]) {
    let mut pos = 0;
    for token in tokens {
        assert_eq!(token.start, pos, "gap or overlap in {:?}", text);
        assert!(token.len > 0, "empty token in {:?}", text);
        pos = token.end();
    }
    assert_eq!(pos, text.len(), "tokens do not reach end of {:?}", text);
}

fn pairs(text: &str, state: ScannerState) -> (Vec<(Category, String)>, ScannerState) {
    let line = classify_line(text, state, &HighlightOptions::default());
    let pairs = line
        .tokens
        .iter()
        .map(|t| (t.category, t.text(text).to_string()))
        .collect();
    (pairs, line.end_state)
}

fn state_strategy() -> impl Strategy<Value = ScannerState> {
    (0..5usize).prop_map(|i| ALL_STATES[i])
}

fn python_like_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("def".to_string()),
            Just("import".to_string()),
            Just("self".to_string()),
            Just("'''".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            Just("\\".to_string()),
            Just("#".to_string()),
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("0x".to_string()),
            Just("1.5e-3j".to_string()),
            Just(".".to_string()),
            "[a-z_]{1,6}",
            "[0-9]{1,4}",
            "[-+*/=<>!%^|&~.,:;(){}\\[\\]@$?]{1,3}",
            "\\PC{1,2}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

#[test]
fn test_multiline_continuity() {
    let (first, state) = pairs("x = \"\"\"", ScannerState::Default);
    assert_eq!(first.last().unwrap(), &(Category::String, "\"\"\"".to_string()));
    assert_eq!(state, ScannerState::InMultilineDoubleQuoteString);

    let (second, state) = pairs("hello", state);
    assert_eq!(second, vec![(Category::String, "hello".to_string())]);
    assert_eq!(state, ScannerState::InMultilineDoubleQuoteString);

    let (third, state) = pairs("\"\"\" + y", state);
    assert_eq!(third[0], (Category::String, "\"\"\"".to_string()));
    assert!(third[1..].iter().all(|(c, _)| *c != Category::String));
    assert_eq!(state, ScannerState::Default);
}

#[test]
fn test_line_continuation_escape() {
    let (tokens, state) = pairs("s = 'abc\\", ScannerState::Default);
    assert_eq!(tokens.last().unwrap(), &(Category::String, "'abc\\".to_string()));
    assert_eq!(state, ScannerState::InSingleQuoteString);

    let (tokens, state) = pairs("def' if x else y", state);
    assert_eq!(tokens[0], (Category::String, "def'".to_string()));
    assert_eq!(tokens[2], (Category::Keyword, "if".to_string()));
    assert_eq!(state, ScannerState::Default);
}

#[test]
fn test_import_and_declaration_lookahead() {
    let (tokens, _) = pairs("from os import path, sys", ScannerState::Default);
    let modules: Vec<_> = tokens
        .iter()
        .filter(|(c, _)| *c == Category::ImportedModule)
        .map(|(_, t)| t.as_str())
        .collect();
    assert_eq!(modules, vec!["os", "path", "sys"]);

    let (tokens, _) = pairs("    def __init__(self):", ScannerState::Default);
    assert_eq!(
        tokens,
        vec![
            (Category::Whitespace, "    ".to_string()),
            (Category::Keyword, "def".to_string()),
            (Category::Whitespace, " ".to_string()),
            (Category::FunctionDeclaration, "__init__".to_string()),
            (Category::Brace, "(".to_string()),
            (Category::SelfReference, "self".to_string()),
            (Category::Brace, ")".to_string()),
            (Category::Operator, ":".to_string()),
        ]
    );
}

#[test]
fn test_keyword_precedence() {
    let (tokens, _) = Scanner::scan_line("self __init__ None print", ScannerState::Default);
    let categories: Vec<_> = tokens.iter().map(|t| t.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::SelfReference,
            Category::Whitespace,
            Category::MagicName,
            Category::Whitespace,
            Category::BuiltinType,
            Category::Whitespace,
            Category::Keyword,
        ]
    );
}

#[test]
fn test_numeric_literals_are_single_tokens() {
    for literal in ["0x1A", "0b101", "0o17", "3.14e-2", "5j", "10L"] {
        let (tokens, _) = Scanner::scan_line(literal, ScannerState::Default);
        assert_eq!(tokens, vec![Token::new(Category::Number, 0, literal.len())]);
    }
}

#[test]
fn test_scanner_never_emits_lookahead_categories() {
    let text = "from a import b; class C: def d(self): pass";
    let (tokens, _) = Scanner::scan_line(text, ScannerState::Default);
    assert!(tokens.iter().all(|t| !matches!(
        t.category,
        Category::ImportedModule | Category::ClassDeclaration | Category::FunctionDeclaration
    )));
}

proptest! {
    #[test]
    fn test_property_tokens_cover_line(text in python_like_line(), state in state_strategy()) {
        let (tokens, _) = Scanner::scan_line(&text, state);
        assert_covers(&text, &tokens);

        let classified = classify_line(&text, state, &HighlightOptions::default());
        assert_covers(&text, &classified.tokens);
    }

    #[test]
    fn test_property_arbitrary_text_covered(text in "\\PC{0,80}", state in state_strategy()) {
        let (tokens, _) = Scanner::scan_line(&text, state);
        assert_covers(&text, &tokens);
    }

    #[test]
    fn test_property_deterministic(text in python_like_line(), state in state_strategy()) {
        let first = classify_line(&text, state, &HighlightOptions::default());
        let second = classify_line(&text, state, &HighlightOptions::default());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_property_bounded_reads(text in python_like_line(), state in state_strategy()) {
        let mut scanner = Scanner::new(&text, state);
        let mut reads = 0;
        while !scanner.read().is_end_of_line() {
            reads += 1;
            prop_assert!(reads <= text.len());
        }
    }

    #[test]
    fn test_property_classifier_keeps_scanner_spans(
        text in python_like_line(),
        state in state_strategy(),
    ) {
        let (scanned, scanned_state) = Scanner::scan_line(&text, state);
        let classified = classify_line(&text, state, &HighlightOptions::default());
        prop_assert_eq!(scanned_state, classified.end_state);
        prop_assert_eq!(scanned.len(), classified.tokens.len());
        for (a, b) in scanned.iter().zip(&classified.tokens) {
            prop_assert_eq!(a.range(), b.range());
            if a.category != b.category {
                prop_assert!(matches!(a.category, Category::Identifier | Category::MagicName));
            }
        }
    }
}
