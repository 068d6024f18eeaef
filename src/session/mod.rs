//! Correction session management module
//!
//! This module contains:
//! - Session state (store, popup, capture paths)
//! - Message types for review interactions

pub mod messages;
pub mod state;
