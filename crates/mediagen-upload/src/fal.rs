//! Fal CDN storage uploader.

use async_trait::async_trait;

use crate::MediaUploader;
use crate::data_uri::{DataUri, is_remote_url};

const FAL_STORAGE_INITIATE_URL: &str = "https://rest.alpha.fal.ai/storage/upload/initiate";

/// Uploads media to the Fal storage CDN.
///
/// Used both by the Fal routes and by PPIO routes whose vendor endpoints
/// only accept public URLs (Kling O1 reference video, motion control).
pub struct FalCdnUploader {
    api_key: String,
    client: reqwest::Client,
}

impl FalCdnUploader {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn upload_bytes(&self, payload: &DataUri) -> anyhow::Result<String> {
        let file_name = format!("upload.{}", payload.extension());

        let resp = self
            .client
            .post(FAL_STORAGE_INITIATE_URL)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&serde_json::json!({
                "content_type": payload.mime_type,
                "file_name": file_name,
            }))
            .send()
            .await?;

        let status = resp.status();
        let json: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            let msg = json
                .get("detail")
                .and_then(|d| d.as_str())
                .unwrap_or("Unknown error");
            return Err(anyhow::anyhow!("Fal storage initiate failed: {msg}"));
        }

        let upload_url = json
            .get("upload_url")
            .and_then(|u| u.as_str())
            .ok_or_else(|| anyhow::anyhow!("Fal storage response missing upload_url"))?;
        let file_url = json
            .get("file_url")
            .and_then(|u| u.as_str())
            .ok_or_else(|| anyhow::anyhow!("Fal storage response missing file_url"))?;

        let put = self
            .client
            .put(upload_url)
            .header("Content-Type", payload.mime_type.clone())
            .body(payload.bytes.clone())
            .send()
            .await?;

        if !put.status().is_success() {
            return Err(anyhow::anyhow!(
                "Fal storage upload failed with status {}",
                put.status()
            ));
        }

        Ok(file_url.to_string())
    }
}

#[async_trait]
impl MediaUploader for FalCdnUploader {
    fn id(&self) -> &str {
        "fal-cdn"
    }

    async fn upload(&self, media: &str) -> anyhow::Result<String> {
        if is_remote_url(media) {
            tracing::debug!("input already a URL, skipping Fal upload");
            return Ok(media.to_string());
        }

        let payload = DataUri::parse(media)?;
        tracing::debug!(
            bytes = payload.bytes.len(),
            mime = %payload.mime_type,
            "uploading to Fal CDN"
        );
        let url = self.upload_bytes(&payload).await?;
        tracing::debug!(%url, "Fal upload complete");
        Ok(url)
    }
}
