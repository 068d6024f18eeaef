//! Annotation message handlers
//!
//! This module wires pointer, popup and store messages to the capture
//! paths, the popup state machine and the annotation store.

pub mod handlers;
