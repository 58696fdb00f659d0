//! Terminal output of highlighted lines using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{Color, LineTokens, ScannerState, Span, Style};

/// Map our palette onto crossterm's
fn term_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

/// Writes highlighted lines to a terminal or any other writer
pub struct Renderer<W: Write> {
    out: W,
    /// Tab width for display
    tab_width: usize,
    /// Prefix each line with its number
    line_numbers: bool,
    /// Emit ANSI styling
    color: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, tab_width: usize) -> Self {
        Self {
            out,
            tab_width: tab_width.max(1),
            line_numbers: false,
            color: true,
        }
    }

    /// Builder: show line numbers
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Builder: enable or disable ANSI styling
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Write one line; `line_idx` is 0-based
    pub fn render_line(&mut self, line_idx: usize, text: &str, spans: &[Span]) -> Result<()> {
        if self.line_numbers {
            queue!(self.out, Print(format!("{:>5} ", line_idx + 1)))?;
        }

        let mut col = 0;
        let mut pos = 0;
        for span in spans {
            if span.start > pos {
                self.write_text(&text[pos..span.start], &mut col, None)?;
            }
            let end = span.end.min(text.len());
            self.write_text(&text[span.start..end], &mut col, Some(span.style))?;
            pos = end;
        }
        if pos < text.len() {
            self.write_text(&text[pos..], &mut col, None)?;
        }

        queue!(self.out, Print("\n"))?;
        Ok(())
    }

    /// Write one line as a token listing, for debugging the scanner
    pub fn dump_tokens(
        &mut self,
        line_idx: usize,
        text: &str,
        initial_state: ScannerState,
        line: &LineTokens,
    ) -> Result<()> {
        writeln!(self.out, "line {} ({:?})", line_idx + 1, initial_state)?;
        for token in &line.tokens {
            writeln!(
                self.out,
                "  {}+{} {} {:?}",
                token.start,
                token.len,
                token.category.name(),
                token.text(text)
            )?;
        }
        writeln!(self.out, "  -> {:?}", line.end_state)?;
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the renderer, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_text(&mut self, text: &str, col: &mut usize, style: Option<Style>) -> Result<()> {
        let expanded = self.expand_tabs(text, col);
        match style {
            Some(style) if self.color && !style.is_default() => {
                self.apply_style(&style)?;
                queue!(self.out, Print(expanded))?;
                self.reset_attributes()?;
            }
            _ => queue!(self.out, Print(expanded))?,
        }
        Ok(())
    }

    /// Replace tabs with spaces up to the next tab stop, tracking the
    /// display column across calls
    fn expand_tabs(&self, text: &str, col: &mut usize) -> String {
        let mut expanded = String::with_capacity(text.len());
        for ch in text.chars() {
            if ch == '\t' {
                let spaces = self.tab_width - (*col % self.tab_width);
                expanded.extend(std::iter::repeat(' ').take(spaces));
                *col += spaces;
            } else {
                expanded.push(ch);
                *col += UnicodeWidthChar::width(ch).unwrap_or(1);
            }
        }
        expanded
    }

    fn apply_style(&mut self, style: &Style) -> Result<()> {
        if style.color != Color::Default {
            queue!(self.out, SetForegroundColor(term_color(style.color)))?;
        }
        if style.emphasis.is_bold() {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.emphasis.is_italic() {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        Ok(())
    }

    /// Reset all attributes
    fn reset_attributes(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }
}
