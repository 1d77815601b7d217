//! Position-indexed palette with reference padding.

use super::error::PaletteError;
use crate::entry::{ColorEntry, Signature};

/// Number of slots in a reference palette.
///
/// The target raster format stores a fixed 256-entry color table, so a
/// styling document that declares fewer colors is padded with fully
/// transparent black up to this size.
pub const REFERENCE_PALETTE_SIZE: usize = 256;

/// What to do with a reference palette that already has
/// [`REFERENCE_PALETTE_SIZE`] or more raw entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversizePolicy {
    /// Keep every entry, no padding and no truncation.
    #[default]
    Keep,
    /// Drop entries past [`REFERENCE_PALETTE_SIZE`].
    Truncate,
    /// Fail with [`PaletteError::TooManyEntries`].
    Reject,
}

/// An ordered palette whose indices are unique and contiguous from 0.
///
/// Built once per validation run and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<ColorEntry>,
}

impl Palette {
    /// Start a palette, assigning indices in push order.
    pub fn builder() -> PaletteBuilder {
        PaletteBuilder::default()
    }

    /// An empty palette, as produced when a raster has no color table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a palette from explicit entries.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::NonContiguousIndex`] if the entry at position
    /// `i` does not carry index `i`.
    pub fn from_entries(entries: Vec<ColorEntry>) -> Result<Self, PaletteError> {
        for (position, entry) in entries.iter().enumerate() {
            if entry.index as usize != position {
                return Err(PaletteError::NonContiguousIndex {
                    position,
                    found: entry.index,
                });
            }
        }
        Ok(Self { entries })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at palette index `index`, if present.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ColorEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }

    /// Signatures in palette order.
    pub fn signatures(&self) -> impl Iterator<Item = Signature> + '_ {
        self.entries.iter().map(ColorEntry::signature)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Accumulates entries with sequential indices.
///
/// Indices are global to the builder, so entries from several color-map
/// groups pushed one after another keep counting up instead of restarting.
#[derive(Debug, Clone, Default)]
pub struct PaletteBuilder {
    entries: Vec<ColorEntry>,
}

impl PaletteBuilder {
    /// Append a color at the next index and return that index.
    pub fn push_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) -> u32 {
        let index = self.entries.len() as u32;
        self.entries.push(ColorEntry::new(index, r, g, b, a));
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish without padding (rendered palettes).
    pub fn finish(self) -> Palette {
        Palette {
            entries: self.entries,
        }
    }

    /// Finish as a reference palette.
    ///
    /// Fewer than [`REFERENCE_PALETTE_SIZE`] entries are padded with
    /// `(0, 0, 0, 0)` at the continuing indices. Larger palettes are handled
    /// according to `policy`.
    pub fn finish_reference(mut self, policy: OversizePolicy) -> Result<Palette, PaletteError> {
        let count = self.entries.len();
        if count < REFERENCE_PALETTE_SIZE {
            self.entries
                .extend((count..REFERENCE_PALETTE_SIZE).map(|i| ColorEntry::transparent(i as u32)));
        } else if count > REFERENCE_PALETTE_SIZE {
            match policy {
                OversizePolicy::Keep => {}
                OversizePolicy::Truncate => self.entries.truncate(REFERENCE_PALETTE_SIZE),
                OversizePolicy::Reject => {
                    return Err(PaletteError::TooManyEntries {
                        count,
                        max: REFERENCE_PALETTE_SIZE,
                    })
                }
            }
        }
        Ok(self.finish())
    }
}
