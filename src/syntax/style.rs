//! Style types for text rendering
//!
//! This module provides the visual attributes attached to lexical
//! categories. Scanning never reads these; they only flow out to the
//! renderer through [`Span`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::HighlightError;

/// Terminal colors (ANSI 16-color palette plus 24-bit RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

const NAMED_COLORS: [(&str, Color); 17] = [
    ("default", Color::Default),
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("white", Color::White),
    ("bright-black", Color::BrightBlack),
    ("bright-red", Color::BrightRed),
    ("bright-green", Color::BrightGreen),
    ("bright-yellow", Color::BrightYellow),
    ("bright-blue", Color::BrightBlue),
    ("bright-magenta", Color::BrightMagenta),
    ("bright-cyan", Color::BrightCyan),
    ("bright-white", Color::BrightWhite),
];

fn rgb_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").ok()
        })
        .as_ref()
}

impl FromStr for Color {
    type Err = HighlightError;

    /// Parse a color name, `#rrggbb` or `rgb(r, g, b)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || HighlightError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        if let Some(caps) = rgb_pattern().and_then(|re| re.captures(s)) {
            let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
            return Ok(Color::Rgb(channel(1)?, channel(2)?, channel(3)?));
        }

        let lower = s.to_lowercase().replace('_', "-");
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, color)| color)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            named => {
                let name = NAMED_COLORS
                    .iter()
                    .find(|(_, color)| color == named)
                    .map_or("default", |(name, _)| *name);
                f.write_str(name)
            }
        }
    }
}

/// Font emphasis applied on top of the color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl Emphasis {
    pub fn is_bold(&self) -> bool {
        matches!(self, Emphasis::Bold | Emphasis::BoldItalic)
    }

    pub fn is_italic(&self) -> bool {
        matches!(self, Emphasis::Italic | Emphasis::BoldItalic)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Emphasis::Normal => "normal",
            Emphasis::Bold => "bold",
            Emphasis::Italic => "italic",
            Emphasis::BoldItalic => "bold-italic",
        }
    }
}

impl FromStr for Emphasis {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "normal" => Ok(Emphasis::Normal),
            "bold" => Ok(Emphasis::Bold),
            "italic" => Ok(Emphasis::Italic),
            "bold-italic" | "bolditalic" => Ok(Emphasis::BoldItalic),
            _ => Err(HighlightError::InvalidEmphasis(s.to_string())),
        }
    }
}

/// Text style attributes for one lexical category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub color: Color,
    /// Bold/italic emphasis
    pub emphasis: Emphasis,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Create an RGB style
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Color::Rgb(r, g, b),
            emphasis: Emphasis::Normal,
        }
    }

    /// Builder: set foreground color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: set emphasis
    pub const fn with_emphasis(self, emphasis: Emphasis) -> Self {
        Self { emphasis, ..self }
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A styled span of text within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
