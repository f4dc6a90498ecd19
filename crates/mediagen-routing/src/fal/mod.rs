//! Fal adapter layer: queue API with per-model submit paths.
//!
//! Fal requests name a submit path (which may carry a subpath like
//! `/edit`) and a model ID used for status and result queries; the two
//! differ whenever a subpath is involved.

pub mod config;
pub mod models;
pub mod parsers;
pub mod status;
