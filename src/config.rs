//! Configuration file support
//!
//! Loads settings from ~/.pyhl.conf (or %USERPROFILE%\.pyhl.conf on Windows)
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # pyhl configuration
//! line-numbers = true
//! tab-width = 4
//! line-start-rule = first-token
//! theme = ~/.config/pyhl/theme.toml
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::syntax::{HighlightOptions, LineStartRule};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// When lookahead keywords count as being at line start
    pub line_start_rule: LineStartRule,
    /// Optional TOML theme file
    pub theme_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            tab_width: 8,
            line_start_rule: LineStartRule::default(),
            theme_path: None,
        }
    }
}

impl Config {
    /// Get the user's home directory
    fn home_dir() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE").ok().map(PathBuf::from)
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME").ok().map(PathBuf::from)
        }
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::home_dir().map(|home| home.join(".pyhl.conf"))
    }

    /// Load configuration from file
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                debug!(path = %path.display(), "loading config");
                let settings = Self::parse(&contents);
                config.apply(&settings);
            }
        }

        config
    }

    /// Classifier options derived from these settings
    pub fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            line_start_rule: self.line_start_rule,
        }
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("line-numbers") {
            self.show_line_numbers = parse_bool(value);
        }

        if let Some(value) = settings.get("tab-width") {
            match value.parse::<usize>() {
                Ok(n) => self.tab_width = n.clamp(1, 16), // Between 1 and 16
                Err(_) => warn!(value = %value, "ignoring invalid tab-width"),
            }
        }

        if let Some(value) = settings.get("line-start-rule") {
            match parse_line_start_rule(value) {
                Some(rule) => self.line_start_rule = rule,
                None => warn!(value = %value, "ignoring unknown line-start-rule"),
            }
        }

        if let Some(value) = settings.get("theme") {
            if !value.is_empty() {
                self.theme_path = Some(expand_home(value));
            }
        }
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

fn parse_line_start_rule(s: &str) -> Option<LineStartRule> {
    match s.to_lowercase().as_str() {
        "first-token" | "default" => Some(LineStartRule::FirstSignificantToken),
        "legacy-whitespace" | "legacy" => Some(LineStartRule::LegacyWhitespace),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(value: &str) -> PathBuf {
    match (value.strip_prefix("~/"), Config::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(value),
    }
}
