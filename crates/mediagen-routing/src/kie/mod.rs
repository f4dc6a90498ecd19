//! KIE adapter layer: job-based API with a shared createTask envelope.
//!
//! All KIE models submit `{model, input}` payloads to the same createTask
//! endpoint; the per-model routes pick the `model` string and shape
//! `input`. Results come back through recordInfo as a JSON-encoded
//! `resultJson` field.

pub mod config;
pub mod models;
pub mod parsers;
pub mod status;
