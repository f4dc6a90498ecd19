use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ──────────────────── Provider & Media Kinds ────────────────────

/// Generation providers supported by the routing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Kie,
    Ppio,
    Fal,
    #[serde(rename = "modelscope")]
    ModelScope,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Kie => "kie",
            ProviderId::Ppio => "ppio",
            ProviderId::Fal => "fal",
            ProviderId::ModelScope => "modelscope",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kie" => Ok(ProviderId::Kie),
            "ppio" => Ok(ProviderId::Ppio),
            "fal" => Ok(ProviderId::Fal),
            "modelscope" => Ok(ProviderId::ModelScope),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Media categories produced by generation tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown media kind: {0}")]
pub struct UnknownMediaKind(pub String);

impl FromStr for MediaKind {
    type Err = UnknownMediaKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            other => Err(UnknownMediaKind(other.to_string())),
        }
    }
}

// ──────────────────── Generation Modes & Tiers ────────────────────

/// Video generation mode selected in the UI.
///
/// `TextImageToVideo` is the default everywhere: routes split it further
/// into text-to-video or image-to-video based on the image count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoMode {
    #[default]
    TextImageToVideo,
    StartEndFrame,
    ReferenceToVideo,
    VideoEdit,
    MotionControl,
}

impl VideoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoMode::TextImageToVideo => "text-image-to-video",
            VideoMode::StartEndFrame => "start-end-frame",
            VideoMode::ReferenceToVideo => "reference-to-video",
            VideoMode::VideoEdit => "video-edit",
            VideoMode::MotionControl => "motion-control",
        }
    }
}

impl fmt::Display for VideoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unsupported video mode: {0}")]
pub struct UnknownVideoMode(pub String);

impl FromStr for VideoMode {
    type Err = UnknownVideoMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text-image-to-video" => Ok(VideoMode::TextImageToVideo),
            "start-end-frame" => Ok(VideoMode::StartEndFrame),
            "reference-to-video" => Ok(VideoMode::ReferenceToVideo),
            "video-edit" => Ok(VideoMode::VideoEdit),
            "motion-control" => Ok(VideoMode::MotionControl),
            other => Err(UnknownVideoMode(other.to_string())),
        }
    }
}

/// Quality/speed tier offered by several vendors under different names
/// ("lite"/"pro", "standard"/"pro", "standard"/"professional").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Lite,
    Standard,
    Pro,
}

// ──────────────────── Generation Params ────────────────────

/// Input bag for image generation requests.
///
/// `images` order is significant: routes treat the first entry as the
/// primary image and later entries as references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImageParams {
    pub prompt: String,
    /// Model ID selected in the UI (e.g. "kie-seedream-4.5").
    pub model: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_images: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_images: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequential_image_generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Provider-specific fields that have no common meaning.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Input bag for video generation requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateVideoParams {
    pub prompt: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Reference/edit video (URL or data URI), required by some modes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<VideoMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<ModelTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_amplitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_fixed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_extend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Input bag for audio (text-to-speech) generation requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateAudioParams {
    pub text: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_boost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex_read: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_normalization: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl GenerateImageParams {
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn extra_bool(&self, key: &str) -> Option<bool> {
        self.extra.get(key).and_then(Value::as_bool)
    }

    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(Value::as_f64)
    }
}

impl GenerateVideoParams {
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }

    pub fn extra_bool(&self, key: &str) -> Option<bool> {
        self.extra.get(key).and_then(Value::as_bool)
    }

    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(Value::as_f64)
    }
}

impl GenerateAudioParams {
    pub fn extra_value(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(Value::as_str)
    }
}

// ──────────────────── Built Requests ────────────────────

/// Vendor-shaped request payload produced by a model route.
///
/// Produced fresh per call and never mutated after return. `endpoint` is
/// the submit path for providers that select endpoints per variant;
/// `model_id` is the ID used for follow-up status queries when it differs
/// from the submit path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    pub request_data: Value,
}

impl BuiltRequest {
    pub fn new(request_data: Value) -> Self {
        Self {
            endpoint: None,
            model_id: None,
            request_data,
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>, request_data: Value) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            model_id: None,
            request_data,
        }
    }
}

// ──────────────────── Task States ────────────────────

/// Unified task state across providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Queued,
    Processing,
    Succeeded,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

// ──────────────────── Normalized Results ────────────────────

/// Separator joining multiple result URLs into one string field.
///
/// The UI splits on this literal to recover the list; the routing layer
/// must preserve it exactly.
pub const RESULT_URL_SEPARATOR: &str = "|||";

/// Join result URLs with [`RESULT_URL_SEPARATOR`].
pub fn join_result_urls<S: AsRef<str>>(urls: &[S]) -> String {
    urls.iter()
        .map(|u| u.as_ref())
        .collect::<Vec<_>>()
        .join(RESULT_URL_SEPARATOR)
}

/// Split a joined result URL field back into the individual URLs.
pub fn split_result_urls(joined: &str) -> Vec<&str> {
    joined.split(RESULT_URL_SEPARATOR).collect()
}

/// Normalized image generation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Result URL(s); multiple URLs are joined with [`RESULT_URL_SEPARATOR`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Normalized video generation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskState>,
}

/// Normalized audio generation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioResult {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskState>,
}

// ──────────────────── Adapter Capabilities ────────────────────

/// Outcome of persisting a remote media URL locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedMedia {
    /// Display URL for the saved copy (or the original remote URL).
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Capability handed to response parsers for persisting results locally.
///
/// Video parsers treat save failures as non-fatal: they log a warning and
/// fall back to the remote URL.
#[async_trait]
pub trait MediaSink: Send + Sync {
    async fn save_media(&self, url: &str, kind: MediaKind) -> anyhow::Result<SavedMedia>;
}

/// Sink that never persists anything; parsers fall back to remote URLs.
pub struct NoopMediaSink;

#[async_trait]
impl MediaSink for NoopMediaSink {
    async fn save_media(&self, _url: &str, _kind: MediaKind) -> anyhow::Result<SavedMedia> {
        Err(anyhow::anyhow!("local media persistence is not available"))
    }
}
