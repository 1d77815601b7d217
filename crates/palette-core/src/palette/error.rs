//! Error types for palette operations
//!
//! This module provides error types for color attribute parsing and palette
//! validation.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing color attribute strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string is empty or cannot be split into three equal channels
    InvalidLength(usize),
    /// Hex string contains non-ASCII characters
    NotAscii,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
    /// A hex channel decoded to a value above 255
    ChannelOutOfRange(u32),
    /// RGB triplet is not three comma-separated byte values
    InvalidTriplet(String),
    /// Opacity is not a finite number
    InvalidOpacity(String),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(len) => {
                write!(
                    f,
                    "invalid hex color length {} (expected a non-zero multiple of 3)",
                    len
                )
            }
            ParseColorError::NotAscii => write!(f, "hex color contains non-ASCII characters"),
            ParseColorError::InvalidHex(err) => write!(f, "invalid hex character: {}", err),
            ParseColorError::ChannelOutOfRange(value) => {
                write!(f, "color channel {} exceeds 255", value)
            }
            ParseColorError::InvalidTriplet(raw) => {
                write!(f, "invalid rgb triplet '{}' (expected r,g,b)", raw)
            }
            ParseColorError::InvalidOpacity(raw) => write!(f, "invalid opacity '{}'", raw),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// Entry indices are not dense and increasing from zero
    NonContiguousIndex {
        /// Position in the entry list
        position: usize,
        /// Index found at that position
        found: u32,
    },
    /// Reference palette exceeds the fixed size under a rejecting policy
    TooManyEntries {
        /// Number of raw entries produced
        count: usize,
        /// Maximum allowed
        max: usize,
    },
    /// Invalid color attribute
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for PaletteError {
    fn from(err: ParseColorError) -> Self {
        PaletteError::ParseColor(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::NonContiguousIndex { position, found } => {
                write!(
                    f,
                    "palette index {} found at position {} (indices must be contiguous from 0)",
                    found, position
                )
            }
            PaletteError::TooManyEntries { count, max } => {
                write!(
                    f,
                    "palette has {} entries, more than the {} allowed",
                    count, max
                )
            }
            PaletteError::ParseColor(err) => write!(f, "invalid color: {}", err),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}
