//! palette-validate
//!
//! Checks that the color table embedded in a rendered raster matches the
//! palette declared by its styling colormap, and reports the differences.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
