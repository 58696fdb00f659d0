//! Scanner state carried across line boundaries
//!
//! This is stored per-line by the host to track whether the next line
//! starts inside a string literal. Nothing else survives a line break.

use crate::error::HighlightError;

/// Carried scanner state between lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScannerState {
    /// Normal code
    #[default]
    Default,
    /// Inside a `'...'` string continued with a trailing backslash
    InSingleQuoteString,
    /// Inside a `"..."` string continued with a trailing backslash
    InDoubleQuoteString,
    /// Inside a `'''...'''` string
    InMultilineSingleQuoteString,
    /// Inside a `"""..."""` string
    InMultilineDoubleQuoteString,
}

impl ScannerState {
    /// Single-line continuation state for a quote character
    pub fn string(quote: char) -> Self {
        if quote == '\'' {
            ScannerState::InSingleQuoteString
        } else {
            ScannerState::InDoubleQuoteString
        }
    }

    /// Multiline state for a quote character
    pub fn multiline(quote: char) -> Self {
        if quote == '\'' {
            ScannerState::InMultilineSingleQuoteString
        } else {
            ScannerState::InMultilineDoubleQuoteString
        }
    }

    /// Quote character of the string this state is inside of
    pub fn quote(&self) -> Option<char> {
        match self {
            ScannerState::Default => None,
            ScannerState::InSingleQuoteString | ScannerState::InMultilineSingleQuoteString => {
                Some('\'')
            }
            ScannerState::InDoubleQuoteString | ScannerState::InMultilineDoubleQuoteString => {
                Some('"')
            }
        }
    }

    /// Check if the next line starts inside a string
    pub fn is_in_string(&self) -> bool {
        *self != ScannerState::Default
    }

    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            ScannerState::InMultilineSingleQuoteString | ScannerState::InMultilineDoubleQuoteString
        )
    }

    /// Integer encoding for hosts that store raw block state
    pub fn as_u8(&self) -> u8 {
        match self {
            ScannerState::Default => 0,
            ScannerState::InSingleQuoteString => 1,
            ScannerState::InDoubleQuoteString => 2,
            ScannerState::InMultilineSingleQuoteString => 3,
            ScannerState::InMultilineDoubleQuoteString => 4,
        }
    }
}

impl TryFrom<u8> for ScannerState {
    type Error = HighlightError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScannerState::Default),
            1 => Ok(ScannerState::InSingleQuoteString),
            2 => Ok(ScannerState::InDoubleQuoteString),
            3 => Ok(ScannerState::InMultilineSingleQuoteString),
            4 => Ok(ScannerState::InMultilineDoubleQuoteString),
            other => Err(HighlightError::InvalidState(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ScannerState::default();
        assert_eq!(state, ScannerState::Default);
        assert!(!state.is_in_string());
        assert_eq!(state.quote(), None);
    }

    #[test]
    fn test_quote_states() {
        assert_eq!(ScannerState::string('\''), ScannerState::InSingleQuoteString);
        assert_eq!(ScannerState::string('"'), ScannerState::InDoubleQuoteString);
        assert_eq!(ScannerState::multiline('\''), ScannerState::InMultilineSingleQuoteString);
        assert!(ScannerState::multiline('"').is_multiline());
        assert!(!ScannerState::string('"').is_multiline());
        assert_eq!(ScannerState::InMultilineDoubleQuoteString.quote(), Some('"'));
    }

    #[test]
    fn test_integer_encoding() {
        for value in 0..=4u8 {
            let state = ScannerState::try_from(value).unwrap();
            assert_eq!(state.as_u8(), value);
        }
        assert!(matches!(
            ScannerState::try_from(5),
            Err(HighlightError::InvalidState(5))
        ));
    }
}
