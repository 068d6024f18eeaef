//! Annotation rendering module
//!
//! This module contains:
//! - Overlay projection of the store for the hosting surface
//! - Image rendering using tiny-skia (for flattened export)

pub mod image;
pub mod overlay;
