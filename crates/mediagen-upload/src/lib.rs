//! mediagen-upload: CDN upload side effects for media inputs.
//!
//! Routes that need a public URL for a local image or video push the bytes
//! through one of these uploaders first. Inputs that are already `http(s)`
//! URLs pass through untouched; data URIs and bare base64 payloads are
//! decoded and uploaded. A failed upload is fatal for the request that
//! needed it; there are no retries here.

pub mod data_uri;
pub mod fal;
pub mod kie;

use async_trait::async_trait;
use futures::future::try_join_all;

pub use data_uri::{DataUri, is_remote_url};
pub use fal::FalCdnUploader;
pub use kie::KieUploader;

/// A CDN upload capability.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Uploader identifier for logs.
    fn id(&self) -> &str;

    /// Upload one media input and return its public URL.
    ///
    /// Remote URLs are returned unchanged.
    async fn upload(&self, media: &str) -> anyhow::Result<String>;
}

/// Upload every input concurrently, preserving order.
///
/// Fan-out/fan-in with no partial-failure recovery: if any single upload
/// fails the aggregate fails, and already-uploaded URLs are not reused.
pub async fn upload_all(
    uploader: &dyn MediaUploader,
    items: &[String],
) -> anyhow::Result<Vec<String>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    tracing::debug!(
        uploader = uploader.id(),
        count = items.len(),
        "uploading media batch"
    );
    try_join_all(items.iter().map(|item| uploader.upload(item))).await
}
