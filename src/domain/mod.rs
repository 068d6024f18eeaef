//! Pure domain types with minimal dependencies
//!
//! This module contains the annotation model, the geometry it is expressed
//! in, and the selection payloads that flow from capture to the popup.

pub mod annotation;
pub mod geometry;
pub mod selection;

pub use annotation::*;
pub use geometry::*;
pub use selection::*;
