//! Hex string codec for sRGB colors.
//!
//! `#rrggbb` (lowercase) is the interchange form used by the result store,
//! the session journal, and the share caption. Parsing accepts either case
//! and an optional leading `#`.

use std::fmt;

use super::space::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseHexError {
    /// The string did not contain exactly six hex digits.
    InvalidLength(usize),
    /// A character outside `[0-9a-fA-F]` was found.
    InvalidDigit(char),
}

impl fmt::Display for ParseHexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseHexError::InvalidLength(found) => {
                write!(f, "expected 6 hex digits, found {}", found)
            }
            ParseHexError::InvalidDigit(ch) => write!(f, "invalid hex digit '{}'", ch),
        }
    }
}

impl std::error::Error for ParseHexError {}

impl Rgb {
    /// Parse a `#rrggbb` or `rrggbb` string, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ParseHexError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let count = digits.chars().count();
        if count != 6 {
            return Err(ParseHexError::InvalidLength(count));
        }

        let mut value: u32 = 0;
        for ch in digits.chars() {
            let digit = ch.to_digit(16).ok_or(ParseHexError::InvalidDigit(ch))?;
            value = value * 16 + digit;
        }

        Ok(Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseHexError, Rgb};

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#3a7ca5").unwrap(), Rgb::new(58, 124, 165));
        assert_eq!(Rgb::from_hex("3a7ca5").unwrap(), Rgb::new(58, 124, 165));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            Rgb::from_hex("#3A7CA5").unwrap(),
            Rgb::from_hex("#3a7ca5").unwrap()
        );
    }

    #[test]
    fn formats_lowercase_with_hash() {
        assert_eq!(Rgb::new(58, 124, 165).to_hex(), "#3a7ca5");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(format!("{}", Rgb::new(255, 255, 255)), "#ffffff");
    }

    #[test]
    fn hex_round_trip() {
        let color = Rgb::new(253, 251, 251);
        assert_eq!(Rgb::from_hex(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            Rgb::from_hex("#12345"),
            Err(ParseHexError::InvalidLength(5))
        );
        assert_eq!(Rgb::from_hex(""), Err(ParseHexError::InvalidLength(0)));
        assert_eq!(
            Rgb::from_hex("#1234567"),
            Err(ParseHexError::InvalidLength(7))
        );
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert_eq!(
            Rgb::from_hex("#12345g"),
            Err(ParseHexError::InvalidDigit('g'))
        );
        assert_eq!(
            Rgb::from_hex("zzzzzz"),
            Err(ParseHexError::InvalidDigit('z'))
        );
    }
}
