//! Python word tables
//!
//! Static lookup tables used to classify identifiers. Each table is kept
//! sorted so membership is a binary search on exact text.

use super::tokens::Category;

/// Reserved keywords (Python 2 `print`/`exec` kept alongside Python 3 additions)
pub const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
    "elif", "else", "except", "exec", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "print", "raise", "return",
    "try", "while", "with", "yield",
];

/// Builtin functions and constants
pub const BUILTINS: &[&str] = &[
    "False", "None", "True", "abs", "chr", "float", "hex", "int", "len", "long", "oct",
    "ord", "range", "xrange",
];

/// Magic methods and attributes
pub const MAGIC_NAMES: &[&str] = &[
    "__abs__", "__add__", "__and__", "__bases__", "__call__", "__cmp__", "__complex__",
    "__contains__", "__copy__", "__deepcopy__", "__del__", "__delattr__", "__delitem__",
    "__delslice__", "__dict__", "__divmod__", "__doc__", "__eq__", "__float__",
    "__floordiv__", "__format__", "__ge__", "__getattr__", "__getitem__", "__getslice__",
    "__gt__", "__hash__", "__hex__", "__index__", "__init__", "__int__", "__inv__",
    "__iter__", "__le__", "__len__", "__long__", "__lshift__", "__lt__", "__mod__",
    "__module__", "__mul__", "__name__", "__ne__", "__neg__", "__nonzero__", "__oct__",
    "__or__", "__pos__", "__pow__", "__repr__", "__reversed__", "__rshift__",
    "__setattr__", "__setitem__", "__setslice__", "__sizeof__", "__str__", "__sub__",
    "__truediv__", "__trunc__", "__unicode__", "__xor__",
];

fn contains(table: &[&str], word: &str) -> bool {
    table.binary_search_by(|probe| (*probe).cmp(word)).is_ok()
}

/// Classify a complete identifier.
///
/// First match wins: `self`, builtins, magic names, keywords, then a
/// plain identifier.
pub fn classify_word(word: &str) -> Category {
    if word == "self" {
        Category::SelfReference
    } else if contains(BUILTINS, word) {
        Category::BuiltinType
    } else if contains(MAGIC_NAMES, word) {
        Category::MagicName
    } else if contains(KEYWORDS, word) {
        Category::Keyword
    } else {
        Category::Identifier
    }
}
