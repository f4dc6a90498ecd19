//! Route trait and the provider/model registry.
//!
//! Every supported model is served by exactly one route. The registry
//! enforces that invariant at dispatch time: zero matches is an
//! unsupported model, two matches is an ambiguity bug surfaced as an
//! error instead of silently picking one.

use async_trait::async_trait;
use mediagen_types::{
    BuiltRequest, GenerateAudioParams, GenerateImageParams, GenerateVideoParams, MediaKind,
    ProviderId,
};
use mediagen_upload::MediaUploader;

use crate::error::RouteError;
use crate::{fal, kie, modelscope, ppio};

/// Capabilities a route may need while building a request.
///
/// Uploaders are passed explicitly; routes that need one fail fast with
/// [`RouteError::UploaderUnavailable`] when it is missing.
#[derive(Default)]
pub struct RouteContext<'a> {
    /// Fal CDN uploader, required by routes whose vendors only accept
    /// public URLs for video/image inputs.
    pub fal_uploader: Option<&'a dyn MediaUploader>,
}

impl<'a> RouteContext<'a> {
    pub fn with_fal_uploader(uploader: &'a dyn MediaUploader) -> Self {
        Self {
            fal_uploader: Some(uploader),
        }
    }

    pub(crate) fn require_fal_uploader(&self) -> Result<&'a dyn MediaUploader, RouteError> {
        self.fal_uploader
            .ok_or(RouteError::UploaderUnavailable("Fal CDN"))
    }
}

/// A mapping from generation params to one vendor request shape.
#[async_trait]
pub trait ModelRoute: Send + Sync + std::fmt::Debug {
    /// Stable route name, used in ambiguity diagnostics.
    fn name(&self) -> &'static str;

    fn provider(&self) -> ProviderId;

    /// Whether this route serves the given model ID.
    fn matches(&self, model_id: &str) -> bool;

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        Err(RouteError::UnsupportedOperation {
            model: params.model.clone(),
            kind: MediaKind::Image,
        })
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        Err(RouteError::UnsupportedOperation {
            model: params.model.clone(),
            kind: MediaKind::Video,
        })
    }

    fn build_audio_request(
        &self,
        params: &GenerateAudioParams,
    ) -> Result<BuiltRequest, RouteError> {
        Err(RouteError::UnsupportedOperation {
            model: params.model.clone(),
            kind: MediaKind::Audio,
        })
    }
}

/// Registry of all model routes, dispatched by `(provider, model_id)`.
pub struct RouteRegistry {
    routes: Vec<Box<dyn ModelRoute>>,
}

impl RouteRegistry {
    pub fn new(routes: Vec<Box<dyn ModelRoute>>) -> Self {
        Self { routes }
    }

    /// Registry with every built-in provider route.
    pub fn with_default_routes() -> Self {
        let mut routes: Vec<Box<dyn ModelRoute>> = Vec::new();
        routes.extend(kie::models::routes());
        routes.extend(ppio::models::routes());
        routes.extend(fal::models::routes());
        routes.extend(modelscope::models::routes());
        Self::new(routes)
    }

    /// Find the unique route serving `model_id` under `provider`.
    pub fn find(
        &self,
        provider: ProviderId,
        model_id: &str,
    ) -> Result<&dyn ModelRoute, RouteError> {
        let mut matching = self
            .routes
            .iter()
            .filter(|route| route.provider() == provider && route.matches(model_id));

        let first = matching
            .next()
            .ok_or_else(|| RouteError::UnsupportedModel(model_id.to_string()))?;

        if let Some(second) = matching.next() {
            return Err(RouteError::AmbiguousRoute {
                model: model_id.to_string(),
                first: first.name(),
                second: second.name(),
            });
        }

        Ok(first.as_ref())
    }

    pub fn routes(&self) -> &[Box<dyn ModelRoute>] {
        &self.routes
    }
}
