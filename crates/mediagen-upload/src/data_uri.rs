//! Data-URI decoding for upload inputs.

use anyhow::Context;
use base64::Engine;

/// Decoded media payload ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Whether the input is already a public `http(s)` URL.
pub fn is_remote_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

impl DataUri {
    /// Decode a `data:<mime>;base64,<payload>` URI or a bare base64 string.
    ///
    /// Bare base64 payloads default to `image/jpeg`, matching what the
    /// upload targets expect from camera-roll inputs.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let (mime_type, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .context("malformed data URI: missing ',' separator")?;
                let mime = header
                    .strip_suffix(";base64")
                    .unwrap_or(header)
                    .trim();
                let mime = if mime.is_empty() { "image/jpeg" } else { mime };
                (mime.to_string(), payload)
            }
            None => ("image/jpeg".to_string(), input),
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .context("invalid base64 payload")?;

        Ok(Self { mime_type, bytes })
    }

    /// File extension matching the mime type, for upload form file names.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "video/mp4" => "mp4",
            "video/webm" => "webm",
            "audio/mpeg" | "audio/mp3" => "mp3",
            _ => "jpg",
        }
    }
}
