#![allow(clippy::module_inception)]

//! palette-core: canonical indexed palettes and their reconciliation
//!
//! This crate holds the dependency-free part of palette validation: the
//! [`ColorEntry`] / [`Signature`] data model, the position-indexed
//! [`Palette`], color attribute parsing, and the exact positional
//! [`reconcile`] step that partitions two palettes into matched,
//! reference-only and rendered-only signatures.
//!
//! # Quick Start
//!
//! ```
//! use palette_core::{reconcile, OversizePolicy, Palette};
//!
//! let mut reference = Palette::builder();
//! reference.push_rgba(255, 0, 0, 255);
//! reference.push_rgba(0, 255, 0, 255);
//! let reference = reference.finish_reference(OversizePolicy::Keep).unwrap();
//! assert_eq!(reference.len(), 256);
//!
//! let mut rendered = Palette::builder();
//! rendered.push_rgba(255, 0, 0, 255);
//! rendered.push_rgba(0, 0, 255, 255);
//! let rendered = rendered.finish();
//!
//! let result = reconcile(&reference, &rendered);
//! assert_eq!(result.matched.len(), 1);
//! assert_eq!(result.rendered_only.len(), 1);
//! assert_eq!(result.reference_only.len(), 255);
//! assert_eq!(result.exit_status(), 1);
//! ```
//!
//! # Identity
//!
//! Two entries are the same only when their full signature
//! `(index, r, g, b, a)` is equal. A correct color at the wrong index is a
//! mismatch on both sides; there is no approximate matching.

pub mod entry;
pub mod palette;
pub mod reconcile;


pub use entry::{ColorEntry, Signature};
pub use palette::{
    opacity_to_alpha, parse_hex_rgb, parse_rgb_triplet, OversizePolicy, Palette, PaletteBuilder,
    PaletteError, ParseColorError, REFERENCE_PALETTE_SIZE,
};
pub use reconcile::{reconcile, Reconciliation, Severity};
