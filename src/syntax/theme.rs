//! Category to style mapping
//!
//! A [`Theme`] is an immutable table with one [`Style`] per category.
//! Updating a style produces a new theme; the highlighter only ever
//! borrows one.
//!
//! Themes can be loaded from TOML:
//! ```toml
//! [styles]
//! Keyword = { color = "blue", emphasis = "bold" }
//! Comment = { color = "#008000" }
//! FunctionDeclaration = { color = "rgb(128, 128, 0)", emphasis = "bold-italic" }
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use super::style::{Color, Emphasis, Style};
use super::tokens::Category;
use crate::error::{HighlightError, Result};

/// Immutable style table indexed by category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    styles: [Style; Category::COUNT],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            styles: Category::ALL.map(|c| c.default_style()),
        }
    }
}

impl Theme {
    /// A theme with no styling at all
    pub fn plain() -> Self {
        Self {
            styles: [Style::default(); Category::COUNT],
        }
    }

    /// Style for a category
    pub fn style(&self, category: Category) -> Style {
        self.styles[category.index()]
    }

    /// Copy of this theme with one style replaced
    pub fn with_style(mut self, category: Category, style: Style) -> Self {
        self.styles[category.index()] = style;
        self
    }

    /// Replace a style by raw category index, rejecting indices that
    /// name no category
    pub fn set_style_by_index(&mut self, index: u8, style: Style) -> Result<()> {
        let category = Category::try_from(index)?;
        self.styles[category.index()] = style;
        Ok(())
    }

    /// Replace a style by category name
    pub fn set_style_by_name(&mut self, name: &str, style: Style) -> Result<()> {
        let category = Category::from_name(name)
            .ok_or_else(|| HighlightError::UnknownCategory(name.to_string()))?;
        self.styles[category.index()] = style;
        Ok(())
    }

    /// Parse a TOML theme, layering it over the default theme.
    ///
    /// Either the whole file applies or nothing does.
    pub fn parse(contents: &str) -> Result<Self> {
        let table: toml::Table = contents.parse()?;
        let mut theme = Theme::default();

        let Some(styles) = table.get("styles") else {
            return Ok(theme);
        };
        let styles = styles
            .as_table()
            .ok_or_else(|| HighlightError::Message("[styles] must be a table".to_string()))?;

        for (name, value) in styles {
            let category = Category::from_name(name)
                .ok_or_else(|| HighlightError::UnknownCategory(name.clone()))?;
            let style = parse_style(theme.style(category), name, value)?;
            theme = theme.with_style(category, style);
        }

        Ok(theme)
    }

    /// Load a TOML theme file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let theme = Self::parse(&contents)?;
        debug!(path = %path.display(), "loaded theme");
        Ok(theme)
    }

    /// Render this theme back to TOML
    pub fn to_toml(&self) -> String {
        let mut out = String::from("[styles]\n");
        for category in Category::ALL {
            let style = self.style(category);
            out.push_str(&format!(
                "{} = {{ color = \"{}\", emphasis = \"{}\" }}\n",
                category.name(),
                style.color,
                style.emphasis.name()
            ));
        }
        out
    }
}

/// Apply one `{ color, emphasis }` entry on top of `base`
fn parse_style(base: Style, name: &str, value: &toml::Value) -> Result<Style> {
    let entry = value
        .as_table()
        .ok_or_else(|| HighlightError::Message(format!("style for {} must be a table", name)))?;

    let mut style = base;
    if let Some(color) = entry.get("color") {
        let color = color
            .as_str()
            .ok_or_else(|| HighlightError::InvalidColor(color.to_string()))?;
        style = style.with_color(color.parse::<Color>()?);
    }
    if let Some(emphasis) = entry.get("emphasis") {
        let emphasis = emphasis
            .as_str()
            .ok_or_else(|| HighlightError::InvalidEmphasis(emphasis.to_string()))?;
        style = style.with_emphasis(emphasis.parse::<Emphasis>()?);
    }
    Ok(style)
}
