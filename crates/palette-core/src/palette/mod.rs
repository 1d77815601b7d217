//! Palette types and utilities
//!
//! This module provides the position-indexed [`Palette`], its builder, and
//! parsers for the color attribute forms found in styling documents.

mod error;
mod palette;
mod parse;

pub use error::{PaletteError, ParseColorError};
pub use palette::{OversizePolicy, Palette, PaletteBuilder, REFERENCE_PALETTE_SIZE};
pub use parse::{opacity_to_alpha, parse_hex_rgb, parse_rgb_triplet};
