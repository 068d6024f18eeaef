//! Annotation and region-marking engine for essay correction
//!
//! A review session captures text selections or image regions, turns them
//! into comments through a popup, keeps them in an ordered store and
//! projects them as overlays. The finished correction is handed to a
//! `CorrectionSink` once every pending upload has resolved.

pub mod annotations;
pub mod capture;
pub mod config;
pub mod correction;
pub mod domain;
pub mod localize;
pub mod render;
pub mod replay;
pub mod session;
pub mod submission;
