//! Subcommand implementations.

use anyhow::Context;
use mediagen_pricing::{PriceParams, calculate_price, format_price, pricing_config};
use mediagen_prompt::{ReferenceCounts, validate_references};
use mediagen_routing::{RouteContext, RouteRegistry};
use mediagen_types::{
    GenerateAudioParams, GenerateImageParams, GenerateVideoParams, MediaKind, ProviderId,
};
use mediagen_upload::FalCdnUploader;
use serde_json::Value;

/// Merge the model and prompt shortcuts into the raw params JSON and
/// decode into the requested param bag. Audio params call their prompt
/// field `text`.
fn decode_params<T: serde::de::DeserializeOwned>(
    raw: &str,
    model: &str,
    prompt: &str,
    prompt_field: &str,
) -> anyhow::Result<T> {
    let mut value: Value = serde_json::from_str(raw).context("invalid --params JSON")?;
    let object = value
        .as_object_mut()
        .context("--params must be a JSON object")?;
    object
        .entry("model")
        .or_insert_with(|| Value::String(model.to_string()));
    object
        .entry(prompt_field)
        .or_insert_with(|| Value::String(prompt.to_string()));
    serde_json::from_value(value).context("params do not match the expected shape")
}

pub async fn run_build_request(
    provider: ProviderId,
    model: &str,
    kind: MediaKind,
    params: &str,
    prompt: &str,
) -> anyhow::Result<()> {
    let registry = RouteRegistry::with_default_routes();
    let route = registry.find(provider, model)?;

    let settings = mediagen_config::load_settings()?;
    let fal_uploader = settings
        .fal_api_key()
        .map(|key| FalCdnUploader::new(key.to_string()));
    let ctx = match &fal_uploader {
        Some(uploader) => RouteContext::with_fal_uploader(uploader),
        None => RouteContext::default(),
    };

    let built = match kind {
        MediaKind::Image => {
            let params: GenerateImageParams = decode_params(params, model, prompt, "prompt")?;
            route.build_image_request(&params)?
        }
        MediaKind::Video => {
            let params: GenerateVideoParams = decode_params(params, model, prompt, "prompt")?;
            route.build_video_request(&params, &ctx).await?
        }
        MediaKind::Audio => {
            let params: GenerateAudioParams = decode_params(params, model, prompt, "text")?;
            route.build_audio_request(&params)?
        }
    };

    tracing::debug!(route = route.name(), "request built");
    println!("{}", serde_json::to_string_pretty(&built)?);
    Ok(())
}

pub fn run_estimate(provider: ProviderId, model: &str, params: &str) -> anyhow::Result<()> {
    let settings = mediagen_config::load_settings()?;
    if !settings.show_prices {
        println!("price display is disabled in settings");
        return Ok(());
    }

    let params: PriceParams = serde_json::from_str(params).context("invalid --params JSON")?;

    match calculate_price(provider, model, &params) {
        Some(value) => {
            // The table only quotes CNY today, but keep the symbol wired
            // through the config.
            let currency = pricing_config(provider, model)
                .map(|config| config.currency.symbol())
                .unwrap_or("");
            println!("{currency}{}", format_price(&value));
        }
        None => {
            println!("no pricing configured for {provider}/{model}");
        }
    }
    Ok(())
}

pub fn run_check_prompt(
    prompt: &str,
    images: usize,
    videos: usize,
    elements: usize,
    max_total: Option<usize>,
) {
    let counts = ReferenceCounts {
        images,
        videos,
        elements,
        max_total,
    };
    let validation = validate_references(prompt, &counts);

    if validation.is_valid {
        println!("ok: all references resolve");
    }
    for error in &validation.errors {
        println!(
            "error: {} at {}..{}: {}",
            error.reference, error.span.start, error.span.end, error.message
        );
    }
    for warning in &validation.warnings {
        println!("warning: {warning}");
    }
}

pub fn run_resolution(
    base_size: u32,
    ratio: &str,
    bounded: bool,
    min: u32,
    max: u32,
    all: bool,
) -> anyhow::Result<()> {
    if all {
        let sizes = mediagen_geometry::calculate_resolutions(
            base_size,
            mediagen_geometry::COMMON_ASPECT_RATIOS,
        );
        for (ratio, size) in &sizes {
            println!("{ratio}\t{}x{}", size.width, size.height);
        }
        return Ok(());
    }

    let (w, h) = ratio
        .split_once(':')
        .context("ratio must look like 16:9")?;
    let w: u32 = w.parse().context("invalid width ratio")?;
    let h: u32 = h.parse().context("invalid height ratio")?;
    anyhow::ensure!(w > 0 && h > 0, "ratio terms must be positive");

    let size = if bounded {
        mediagen_geometry::calculate_resolution_with_bounds(base_size, w, h, min, max)
    } else {
        mediagen_geometry::calculate_resolution(base_size, w, h)
    };
    println!("{}x{}", size.width, size.height);
    Ok(())
}
