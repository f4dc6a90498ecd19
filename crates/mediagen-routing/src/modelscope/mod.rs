//! ModelScope adapter layer.
//!
//! One unified route serves every ModelScope model, preset or custom,
//! since they all share the `/v1/images/generations` endpoint; only the
//! `model` field changes.

pub mod config;
pub mod models;
pub mod parsers;
