//! Palette entry and its match signature

use std::fmt;

/// One slot of an indexed palette: a position and an RGBA value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorEntry {
    pub index: u32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorEntry {
    #[inline]
    pub fn new(index: u32, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { index, r, g, b, a }
    }

    /// Fully transparent black at `index`, used to pad reference palettes.
    #[inline]
    pub fn transparent(index: u32) -> Self {
        Self::new(index, 0, 0, 0, 0)
    }

    /// The `(index, r, g, b, a)` tuple used for exact matching.
    #[inline]
    pub fn signature(&self) -> Signature {
        Signature {
            index: self.index,
            rgba: [self.r, self.g, self.b, self.a],
        }
    }
}

/// Identity of a palette entry for reconciliation.
///
/// Equal only when both the index and all four channels are equal.
/// Displays as `"<index>: r,g,b,a"`, the same form the color-table section
/// of the raster introspection output uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
    pub index: u32,
    pub rgba: [u8; 4],
}

impl Signature {
    #[inline]
    pub fn new(index: u32, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            index,
            rgba: [r, g, b, a],
        }
    }
}

impl From<ColorEntry> for Signature {
    fn from(entry: ColorEntry) -> Self {
        entry.signature()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.rgba;
        write!(f, "{}: {},{},{},{}", self.index, r, g, b, a)
    }
}
