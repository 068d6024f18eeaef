//! Selection capture module
//!
//! This module consolidates the two input modalities:
//! - Text-range capture from a native selection (text.rs)
//! - Rectangle drag capture over an image (image.rs)

pub mod image;
pub mod text;
