//! Error types for the routing layer.

use mediagen_types::{MediaKind, ProviderId};
use thiserror::Error;

/// Failures while selecting a route or building a vendor request.
///
/// Validation errors surface before any network call; the only network
/// side effect a route performs is the CDN upload, whose failure is fatal
/// for the request being built.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),
    #[error("model {model} matches multiple routes ({first} and {second})")]
    AmbiguousRoute {
        model: String,
        first: &'static str,
        second: &'static str,
    },
    #[error("model {model} does not support {kind} generation")]
    UnsupportedOperation { model: String, kind: MediaKind },
    #[error("unsupported video mode: {0}")]
    UnsupportedMode(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("no {0} uploader configured")]
    UploaderUnavailable(&'static str),
    #[error("media upload failed: {0}")]
    Upload(anyhow::Error),
}

impl RouteError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RouteError::InvalidInput(message.into())
    }
}

/// Failures while normalizing a vendor response.
///
/// A response matching none of the known shapes is always an explicit
/// "no result" error; parsers never hand back partially-populated
/// results.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{provider} returned no {kind} result")]
    NoResult {
        provider: ProviderId,
        kind: MediaKind,
    },
    #[error("{provider} task failed: {message}")]
    TaskFailed {
        provider: ProviderId,
        message: String,
    },
    #[error("{provider} returned a malformed response: {detail}")]
    MalformedResponse {
        provider: ProviderId,
        detail: String,
    },
}

impl ParseError {
    pub fn no_result(provider: ProviderId, kind: MediaKind) -> Self {
        ParseError::NoResult { provider, kind }
    }
}
