//! KIE file-stream uploader.

use async_trait::async_trait;
use reqwest::multipart;

use crate::MediaUploader;
use crate::data_uri::{DataUri, is_remote_url};

const KIE_UPLOAD_BASE_URL: &str = "https://kieai.redpandaai.co";
const KIE_UPLOAD_ENDPOINT: &str = "/api/file-stream-upload";
const KIE_UPLOAD_PATH: &str = "media-uploads";

/// Uploads media to the KIE CDN before task creation.
pub struct KieUploader {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl KieUploader {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: KIE_UPLOAD_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl MediaUploader for KieUploader {
    fn id(&self) -> &str {
        "kie-cdn"
    }

    async fn upload(&self, media: &str) -> anyhow::Result<String> {
        if is_remote_url(media) {
            return Ok(media.to_string());
        }

        let payload = DataUri::parse(media)?;
        let part = multipart::Part::bytes(payload.bytes.clone())
            .file_name(format!("upload.{}", payload.extension()))
            .mime_str(&payload.mime_type)?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("uploadPath", KIE_UPLOAD_PATH);

        let resp = self
            .client
            .post(format!("{}{}", self.base_url, KIE_UPLOAD_ENDPOINT))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let json: serde_json::Value = resp.json().await?;

        if !status.is_success() {
            let msg = json
                .get("msg")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            return Err(anyhow::anyhow!("KIE upload failed: {msg}"));
        }

        // The envelope carries either fileUrl or downloadUrl depending on
        // the storage backend.
        let url = json
            .get("data")
            .and_then(|d| {
                d.get("fileUrl")
                    .or_else(|| d.get("downloadUrl"))
                    .and_then(|u| u.as_str())
            })
            .ok_or_else(|| anyhow::anyhow!("KIE upload response missing file URL"))?;

        tracing::debug!(%url, "KIE upload complete");
        Ok(url.to_string())
    }
}
